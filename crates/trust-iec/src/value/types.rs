#![allow(missing_docs)]

use std::fmt;
use std::str::FromStr;

use crate::error::IecError;

/// Elementary and derived type tags.
///
/// The discriminant is the promotion ordinal: `promote` only ever moves a
/// value to a tag with a strictly higher ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum IecType {
    Null = 0x00,
    Bool = 0x01,
    SInt = 0x02,
    USInt = 0x03,
    Byte = 0x04,
    Int = 0x05,
    UInt = 0x06,
    Word = 0x07,
    DInt = 0x08,
    UDInt = 0x09,
    DWord = 0x0a,
    LInt = 0x0b,
    ULInt = 0x0c,
    LWord = 0x0d,
    Real = 0x0e,
    LReal = 0x0f,
    Time = 0x10,
    Date = 0x11,
    Tod = 0x12,
    Dt = 0x13,
    Char = 0x14,
    WChar = 0x15,
    String = 0x16,
    WString = 0x17,
    Pointer = 0x18,
    Table = 0x19,
    User = 0x1a,
    REdge = 0x1b,
    FEdge = 0x1c,
    Timer = 0x1d,
}

impl IecType {
    /// Every tag, in ordinal order.
    pub const ALL: [IecType; 30] = [
        Self::Null,
        Self::Bool,
        Self::SInt,
        Self::USInt,
        Self::Byte,
        Self::Int,
        Self::UInt,
        Self::Word,
        Self::DInt,
        Self::UDInt,
        Self::DWord,
        Self::LInt,
        Self::ULInt,
        Self::LWord,
        Self::Real,
        Self::LReal,
        Self::Time,
        Self::Date,
        Self::Tod,
        Self::Dt,
        Self::Char,
        Self::WChar,
        Self::String,
        Self::WString,
        Self::Pointer,
        Self::Table,
        Self::User,
        Self::REdge,
        Self::FEdge,
        Self::Timer,
    ];

    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Storage width in bits; `0` for types without a fixed-width payload.
    #[must_use]
    pub const fn bit_width(self) -> u32 {
        match self {
            Self::Null | Self::String | Self::WString | Self::Table | Self::User | Self::Timer => {
                0
            }
            Self::Bool | Self::REdge | Self::FEdge => 1,
            Self::SInt | Self::USInt | Self::Byte | Self::Char => 8,
            Self::Int | Self::UInt | Self::Word | Self::WChar => 16,
            Self::DInt | Self::UDInt | Self::DWord | Self::Real | Self::Date | Self::Tod => 32,
            Self::LInt
            | Self::ULInt
            | Self::LWord
            | Self::LReal
            | Self::Time
            | Self::Dt
            | Self::Pointer => 64,
        }
    }

    /// True for BOOL and the edge-qualified booleans sharing its payload.
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, Self::Bool | Self::REdge | Self::FEdge)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool => "BOOL",
            Self::SInt => "SINT",
            Self::USInt => "USINT",
            Self::Byte => "BYTE",
            Self::Int => "INT",
            Self::UInt => "UINT",
            Self::Word => "WORD",
            Self::DInt => "DINT",
            Self::UDInt => "UDINT",
            Self::DWord => "DWORD",
            Self::LInt => "LINT",
            Self::ULInt => "ULINT",
            Self::LWord => "LWORD",
            Self::Real => "REAL",
            Self::LReal => "LREAL",
            Self::Time => "TIME",
            Self::Date => "DATE",
            Self::Tod => "TOD",
            Self::Dt => "DT",
            Self::Char => "CHAR",
            Self::WChar => "WCHAR",
            Self::String => "STRING",
            Self::WString => "WSTRING",
            Self::Pointer => "POINTER",
            Self::Table => "TABLE",
            Self::User => "USER",
            Self::REdge => "R_EDGE",
            Self::FEdge => "F_EDGE",
            Self::Timer => "TIMER",
        }
    }

    /// Looks a tag up by its (case-insensitive) name. The long date/time
    /// spellings are accepted as aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        match upper.as_str() {
            "TIME_OF_DAY" => return Some(Self::Tod),
            "DATE_AND_TIME" => return Some(Self::Dt),
            _ => {}
        }
        Self::ALL.into_iter().find(|ty| ty.name() == upper)
    }
}

impl fmt::Display for IecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IecType {
    type Err = IecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(IecError::TypeNotDefined)
    }
}

impl From<IecType> for u8 {
    fn from(ty: IecType) -> Self {
        ty.ordinal()
    }
}

impl TryFrom<u8> for IecType {
    type Error = IecError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(ordinal))
            .copied()
            .ok_or(IecError::TypeNotDefined)
    }
}

#[cfg(test)]
mod tests {
    use super::IecType;

    #[test]
    fn ordinals_follow_declaration_order() {
        for (index, ty) in IecType::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(ty.ordinal()), index);
            assert_eq!(IecType::try_from(ty.ordinal()), Ok(ty));
        }
        assert!(IecType::try_from(30).is_err());
    }

    #[test]
    fn names_round_trip() {
        for ty in IecType::ALL {
            assert_eq!(IecType::from_name(ty.name()), Some(ty));
        }
        assert_eq!(IecType::from_name("time_of_day"), Some(IecType::Tod));
        assert_eq!(IecType::from_name("Date_And_Time"), Some(IecType::Dt));
        assert_eq!(IecType::from_name("QWORD"), None);
    }
}
