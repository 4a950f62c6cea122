//! Typed payload storage and the generic numeric view.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Rem, Sub};

use smol_str::SmolStr;

use super::datetime::{DateTimeValue, DateValue, Duration, TimeOfDayValue};
use super::IecType;

const NANOS_PER_MILLI: i64 = 1_000_000;

/// Generic numeric view of a payload.
///
/// Integers of every width fit in `i128` without loss; arithmetic wraps and
/// the final store truncates to the destination width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Any integral, boolean, character or tick-based value.
    Int(i128),
    /// REAL and LREAL values, and TIME values with a sub-millisecond part.
    Real(f64),
}

impl Number {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Real(value) => value,
        }
    }

    /// Integer view; reals are truncated toward zero (saturating).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i128(self) -> i128 {
        match self {
            Self::Int(value) => value,
            Self::Real(value) => value as i128,
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(value) => value == 0,
            Self::Real(value) => value == 0.0,
        }
    }

    #[must_use]
    pub fn is_real(self) -> bool {
        matches!(self, Self::Real(_))
    }

    #[must_use]
    pub fn to_real(self) -> Self {
        Self::Real(self.as_f64())
    }

    #[must_use]
    pub fn abs(self) -> Self {
        match self {
            Self::Int(value) => Self::Int(value.wrapping_abs()),
            Self::Real(value) => Self::Real(value.abs()),
        }
    }

    /// Orders two numbers; `None` only when a NaN is involved.
    #[must_use]
    pub fn compare(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.wrapping_add(b)),
            (a, b) => Self::Real(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.wrapping_sub(b)),
            (a, b) => Self::Real(a.as_f64() - b.as_f64()),
        }
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.wrapping_mul(b)),
            (a, b) => Self::Real(a.as_f64() * b.as_f64()),
        }
    }
}

/// Integer division truncates toward zero; an integer zero divisor yields 0.
impl Div for Number {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(_), Self::Int(0)) => Self::Int(0),
            (Self::Int(a), Self::Int(b)) => Self::Int(a.wrapping_div(b)),
            (a, b) => Self::Real(a.as_f64() / b.as_f64()),
        }
    }
}

/// Remainder takes the sign of the dividend; a zero divisor yields 0.
impl Rem for Number {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(_), Self::Int(0)) => Self::Int(0),
            (Self::Int(a), Self::Int(b)) => Self::Int(a.wrapping_rem(b)),
            (_, b) if b.is_zero() => Self::Real(0.0),
            (a, b) => Self::Real(a.as_f64() % b.as_f64()),
        }
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        Self::Int(i128::from(value))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(i128::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self::Int(i128::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

/// STRING / WSTRING payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringValue {
    text: SmolStr,
    hash: Option<u32>,
}

impl StringValue {
    #[must_use]
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self {
            text: text.into(),
            hash: None,
        }
    }

    /// Builds a string with its CRC-32 content hash cached.
    #[must_use]
    pub fn hashed(text: impl Into<SmolStr>) -> Self {
        let text = text.into();
        let hash = crc32fast::hash(text.as_bytes());
        Self {
            text,
            hash: Some(hash),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn hash(&self) -> Option<u32> {
        self.hash
    }
}

/// TABLE payload: an owned opaque buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableValue {
    data: Vec<u8>,
}

impl TableValue {
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            data: vec![0; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// USER payload: a host-defined tag and buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserValue {
    pub value: u32,
    pub data: Vec<u8>,
}

/// TIMER payload shared by TP, TON and TOF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerState {
    pub q: bool,
    pub pt: Duration,
    pub et: Duration,
    /// A start instant has been latched into `t0`.
    pub running: bool,
    pub t0: Duration,
}

impl TimerState {
    #[must_use]
    pub fn armed(pt: Duration) -> Self {
        Self {
            pt,
            ..Self::default()
        }
    }
}

/// Payload storage, one shape per type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Null,
    /// BOOL, R_EDGE and F_EDGE.
    Bool(bool),
    SInt(i8),
    USInt(u8),
    Byte(u8),
    Int(i16),
    UInt(u16),
    Word(u16),
    DInt(i32),
    UDInt(u32),
    DWord(u32),
    LInt(i64),
    ULInt(u64),
    LWord(u64),
    Real(f32),
    LReal(f64),
    Time(Duration),
    Date(DateValue),
    Tod(TimeOfDayValue),
    Dt(DateTimeValue),
    Char(u8),
    WChar(u16),
    /// STRING and WSTRING.
    String(StringValue),
    Pointer(u64),
    Table(TableValue),
    User(UserValue),
    Timer(TimerState),
}

impl Payload {
    /// Zero payload shaped for `ty`.
    #[must_use]
    pub fn zeroed(ty: IecType) -> Self {
        match ty {
            IecType::Null => Self::Null,
            IecType::Bool | IecType::REdge | IecType::FEdge => Self::Bool(false),
            IecType::SInt => Self::SInt(0),
            IecType::USInt => Self::USInt(0),
            IecType::Byte => Self::Byte(0),
            IecType::Int => Self::Int(0),
            IecType::UInt => Self::UInt(0),
            IecType::Word => Self::Word(0),
            IecType::DInt => Self::DInt(0),
            IecType::UDInt => Self::UDInt(0),
            IecType::DWord => Self::DWord(0),
            IecType::LInt => Self::LInt(0),
            IecType::ULInt => Self::ULInt(0),
            IecType::LWord => Self::LWord(0),
            IecType::Real => Self::Real(0.0),
            IecType::LReal => Self::LReal(0.0),
            IecType::Time => Self::Time(Duration::ZERO),
            IecType::Date => Self::Date(DateValue::default()),
            IecType::Tod => Self::Tod(TimeOfDayValue::default()),
            IecType::Dt => Self::Dt(DateTimeValue::default()),
            IecType::Char => Self::Char(0),
            IecType::WChar => Self::WChar(0),
            IecType::String | IecType::WString => Self::String(StringValue::default()),
            IecType::Pointer => Self::Pointer(0),
            IecType::Table => Self::Table(TableValue::default()),
            IecType::User => Self::User(UserValue::default()),
            IecType::Timer => Self::Timer(TimerState::default()),
        }
    }

    /// Numeric view; `None` for payloads without one.
    ///
    /// TIME reads as milliseconds, date types as their ticks.
    #[must_use]
    pub fn number(&self) -> Option<Number> {
        let number = match *self {
            Self::Bool(value) => Number::from(value),
            Self::SInt(value) => Number::Int(value.into()),
            Self::USInt(value) | Self::Byte(value) | Self::Char(value) => {
                Number::Int(value.into())
            }
            Self::Int(value) => Number::Int(value.into()),
            Self::UInt(value) | Self::Word(value) | Self::WChar(value) => {
                Number::Int(value.into())
            }
            Self::DInt(value) => Number::Int(value.into()),
            Self::UDInt(value) | Self::DWord(value) => Number::Int(value.into()),
            Self::LInt(value) => Number::Int(value.into()),
            Self::ULInt(value) | Self::LWord(value) | Self::Pointer(value) => {
                Number::Int(value.into())
            }
            Self::Real(value) => Number::Real(value.into()),
            Self::LReal(value) => Number::Real(value),
            Self::Time(value) => time_to_number(value),
            Self::Date(value) => Number::Int(value.ticks().into()),
            Self::Tod(value) => Number::Int(value.ticks().into()),
            Self::Dt(value) => Number::Int(value.ticks().into()),
            Self::Null | Self::String(_) | Self::Table(_) | Self::User(_) | Self::Timer(_) => {
                return None;
            }
        };
        Some(number)
    }

    /// Stores `number` with native truncation. Payloads without a numeric
    /// view are left unchanged.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn store(&mut self, number: Number) {
        macro_rules! narrow {
            ($target:ty) => {
                match number {
                    Number::Int(value) => value as $target,
                    Number::Real(value) => value as $target,
                }
            };
        }
        match self {
            Self::Bool(slot) => *slot = !number.is_zero(),
            Self::SInt(slot) => *slot = narrow!(i8),
            Self::USInt(slot) | Self::Byte(slot) | Self::Char(slot) => *slot = narrow!(u8),
            Self::Int(slot) => *slot = narrow!(i16),
            Self::UInt(slot) | Self::Word(slot) | Self::WChar(slot) => *slot = narrow!(u16),
            Self::DInt(slot) => *slot = narrow!(i32),
            Self::UDInt(slot) | Self::DWord(slot) => *slot = narrow!(u32),
            Self::LInt(slot) => *slot = narrow!(i64),
            Self::ULInt(slot) | Self::LWord(slot) | Self::Pointer(slot) => *slot = narrow!(u64),
            Self::Real(slot) => *slot = number.as_f64() as f32,
            Self::LReal(slot) => *slot = number.as_f64(),
            Self::Time(slot) => *slot = number_to_time(number),
            Self::Date(slot) => *slot = DateValue::new(narrow!(i64)),
            Self::Tod(slot) => *slot = TimeOfDayValue::new(narrow!(i64)),
            Self::Dt(slot) => *slot = DateTimeValue::new(narrow!(i64)),
            Self::Null | Self::String(_) | Self::Table(_) | Self::User(_) | Self::Timer(_) => {}
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn time_to_number(value: Duration) -> Number {
    let nanos = value.as_nanos();
    if nanos % NANOS_PER_MILLI == 0 {
        Number::Int((nanos / NANOS_PER_MILLI).into())
    } else {
        Number::Real(nanos as f64 / NANOS_PER_MILLI as f64)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn number_to_time(number: Number) -> Duration {
    match number {
        Number::Int(millis) => Duration::from_millis(millis as i64),
        Number::Real(millis) => Duration::from_nanos((millis * NANOS_PER_MILLI as f64) as i64),
    }
}
