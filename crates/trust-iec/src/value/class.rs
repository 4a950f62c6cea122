//! ANY_* classification of type tags.

#![allow(missing_docs)]

use bitflags::bitflags;

use super::IecType;

bitflags! {
    /// Cached category membership of a type tag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AnyClass: u16 {
        const NUM = 0x0001;
        const DATE = 0x0002;
        const BIT = 0x0004;
        const REAL = 0x0008;
        const STRING = 0x0010;
        const ELEMENTARY = 0x0020;
        const MAGNITUDE = 0x0040;
        const INT = 0x0080;
        const INTEGRAL = 0x0100;
        const UNSIGNED = 0x0200;
        const SIGNED = 0x0400;
        const CHAR = 0x0800;
        const CHARS = 0x1000;
    }
}

impl AnyClass {
    /// IEC names of the set categories, in bit order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        const NAMES: [(AnyClass, &str); 13] = [
            (AnyClass::NUM, "ANY_NUM"),
            (AnyClass::DATE, "ANY_DATE"),
            (AnyClass::BIT, "ANY_BIT"),
            (AnyClass::REAL, "ANY_REAL"),
            (AnyClass::STRING, "ANY_STRING"),
            (AnyClass::ELEMENTARY, "ANY_ELEMENTARY"),
            (AnyClass::MAGNITUDE, "ANY_MAGNITUDE"),
            (AnyClass::INT, "ANY_INT"),
            (AnyClass::INTEGRAL, "ANY_INTEGRAL"),
            (AnyClass::UNSIGNED, "ANY_UNSIGNED"),
            (AnyClass::SIGNED, "ANY_SIGNED"),
            (AnyClass::CHAR, "ANY_CHAR"),
            (AnyClass::CHARS, "ANY_CHARS"),
        ];
        NAMES
            .into_iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
            .collect()
    }
}

fn is_signed(ty: IecType) -> bool {
    matches!(
        ty,
        IecType::SInt | IecType::Int | IecType::DInt | IecType::LInt
    )
}

fn is_unsigned(ty: IecType) -> bool {
    matches!(
        ty,
        IecType::USInt | IecType::UInt | IecType::UDInt | IecType::ULInt
    )
}

fn is_real(ty: IecType) -> bool {
    matches!(ty, IecType::Real | IecType::LReal)
}

fn is_bit(ty: IecType) -> bool {
    matches!(
        ty,
        IecType::Bool
            | IecType::Byte
            | IecType::Word
            | IecType::DWord
            | IecType::LWord
            | IecType::REdge
            | IecType::FEdge
    )
}

fn is_date(ty: IecType) -> bool {
    matches!(ty, IecType::Date | IecType::Tod | IecType::Dt)
}

fn is_string(ty: IecType) -> bool {
    matches!(ty, IecType::String | IecType::WString)
}

fn is_char(ty: IecType) -> bool {
    matches!(ty, IecType::Char | IecType::WChar)
}

/// Computes the category mask of a type tag.
#[must_use]
pub fn classify(ty: IecType) -> AnyClass {
    let int = is_signed(ty) || is_unsigned(ty);
    let num = int || is_real(ty);
    let bit = is_bit(ty);
    let magnitude = num || ty == IecType::Time;
    let chars = is_char(ty) || is_string(ty);

    let mut class = AnyClass::empty();
    class.set(AnyClass::NUM, num);
    class.set(AnyClass::DATE, is_date(ty));
    class.set(AnyClass::BIT, bit);
    class.set(AnyClass::REAL, is_real(ty));
    class.set(AnyClass::STRING, is_string(ty));
    class.set(
        AnyClass::ELEMENTARY,
        magnitude || bit || chars || is_date(ty),
    );
    class.set(AnyClass::MAGNITUDE, magnitude);
    class.set(AnyClass::INT, int);
    class.set(AnyClass::INTEGRAL, int || bit);
    class.set(AnyClass::UNSIGNED, is_unsigned(ty));
    class.set(AnyClass::SIGNED, is_signed(ty));
    class.set(AnyClass::CHAR, is_char(ty));
    class.set(AnyClass::CHARS, chars);
    class
}
