use smol_str::SmolStr;
use tracing::trace;

use super::class::{classify, AnyClass};
use super::datetime::Duration;
use super::flags::{Attributes, StateFlags};
use super::payload::{Number, Payload, StringValue, TimerState};
use super::IecType;

/// Dynamically typed IEC value.
///
/// The type tag, its cached classification and the payload shape always
/// agree: the tag only changes through [`Value::to_type`] and
/// [`Value::promote`], which rebuild the payload for the new tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    ty: IecType,
    class: AnyClass,
    attrs: Attributes,
    state: StateFlags,
    payload: Payload,
}

impl Value {
    /// Zero value of `ty` with all flags cleared.
    #[must_use]
    pub fn new(ty: IecType) -> Self {
        Self {
            ty,
            class: classify(ty),
            attrs: Attributes::empty(),
            state: StateFlags::empty(),
            payload: Payload::zeroed(ty),
        }
    }

    #[must_use]
    pub fn null() -> Self {
        Self::new(IecType::Null)
    }

    /// Value of `ty` holding `number`, narrowed natively.
    #[must_use]
    pub fn with_number(ty: IecType, number: Number) -> Self {
        let mut value = Self::new(ty);
        value.payload.store(number);
        value
    }

    /// STRING (or WSTRING when `wide`) owning `text`; `hash` caches the
    /// CRC-32 of the content.
    #[must_use]
    pub fn string(text: impl Into<SmolStr>, wide: bool, hash: bool) -> Self {
        let mut value = Self::null();
        value.set_string(text, wide, hash);
        value
    }

    /// Releases the value. Ownership makes a second release impossible.
    pub fn destroy(self) {}

    #[must_use]
    pub fn ty(&self) -> IecType {
        self.ty
    }

    #[must_use]
    pub fn class(&self) -> AnyClass {
        self.class
    }

    #[must_use]
    pub fn is(&self, class: AnyClass) -> bool {
        self.class.intersects(class)
    }

    #[must_use]
    pub fn attributes(&self) -> Attributes {
        self.attrs
    }

    pub fn set_attribute(&mut self, attr: Attributes, on: bool) {
        self.attrs.set(attr, on);
    }

    #[must_use]
    pub fn state(&self) -> StateFlags {
        self.state
    }

    #[must_use]
    pub fn has_state(&self, flag: StateFlags) -> bool {
        self.state.contains(flag)
    }

    pub fn set_state(&mut self, flag: StateFlags, on: bool) {
        self.state.set(flag, on);
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Replaces the payload when it matches the current tag's shape.
    ///
    /// Returns `false` (and keeps the old payload) on a shape mismatch.
    pub fn set_payload(&mut self, payload: Payload) -> bool {
        if std::mem::discriminant(&payload) != std::mem::discriminant(&Payload::zeroed(self.ty)) {
            return false;
        }
        self.payload = payload;
        true
    }

    /// Retypes to STRING (WSTRING when `wide`) and takes ownership of
    /// `text`. Flags survive.
    pub fn set_string(&mut self, text: impl Into<SmolStr>, wide: bool, hash: bool) {
        self.to_type(if wide { IecType::WString } else { IecType::String });
        self.payload = Payload::String(if hash {
            StringValue::hashed(text)
        } else {
            StringValue::new(text)
        });
    }

    /// Generic numeric view of the payload.
    #[must_use]
    pub fn number(&self) -> Option<Number> {
        self.payload.number()
    }

    /// Numeric view, with non-numeric payloads reading as zero.
    #[must_use]
    pub fn number_or_zero(&self) -> Number {
        self.number().unwrap_or(Number::Int(0))
    }

    /// Stores `number` with native truncation. No effect on payloads
    /// without a numeric view.
    pub fn set_number(&mut self, number: Number) {
        self.payload.store(number);
    }

    /// Boolean reading: non-zero numeric payloads are true.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        self.number().is_some_and(|number| !number.is_zero())
    }

    pub fn set_bool(&mut self, on: bool) {
        self.payload.store(Number::from(on));
    }

    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.number_or_zero().as_f64()
    }

    /// Integer reading truncated toward zero and saturated to `i64`.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        let wide = self.number_or_zero().as_i128();
        i64::try_from(wide).unwrap_or(if wide < 0 { i64::MIN } else { i64::MAX })
    }

    #[must_use]
    pub fn as_duration(&self) -> Option<Duration> {
        match self.payload {
            Payload::Time(duration) => Some(duration),
            _ => None,
        }
    }

    /// Retypes to TIME and stores `duration`. Flags survive.
    pub fn set_duration(&mut self, duration: Duration) {
        self.to_type(IecType::Time);
        self.payload = Payload::Time(duration);
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn timer(&self) -> Option<&TimerState> {
        match &self.payload {
            Payload::Timer(state) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn timer_mut(&mut self) -> Option<&mut TimerState> {
        match &mut self.payload {
            Payload::Timer(state) => Some(state),
            _ => None,
        }
    }

    /// True when retyping carries the current value over.
    fn carries_number(&self) -> bool {
        self.ty.is_boolean()
            || self.class.intersects(
                AnyClass::NUM | AnyClass::BIT | AnyClass::MAGNITUDE | AnyClass::CHAR,
            )
    }

    /// Retypes in place. Numeric-like values (numbers, bit strings, TIME
    /// and characters) keep their value, narrowed natively; any other old
    /// payload is dropped and the new one starts at zero. Flags survive.
    pub fn to_type(&mut self, ty: IecType) {
        if ty == self.ty {
            return;
        }
        let carried = if self.carries_number() {
            self.payload.number()
        } else {
            None
        };
        trace!(from = %self.ty, to = %ty, "retype");
        self.ty = ty;
        self.class = classify(ty);
        self.payload = Payload::zeroed(ty);
        if let Some(number) = carried {
            self.payload.store(number);
        }
    }

    /// Retypes only when `ty` outranks the current tag. Returns whether the
    /// tag changed.
    pub fn promote(&mut self, ty: IecType) -> bool {
        if ty.ordinal() <= self.ty.ordinal() {
            return false;
        }
        self.to_type(ty);
        true
    }

    /// Full retype-and-copy of `src`: tag, flags, classification and
    /// payload.
    pub fn move_from(&mut self, src: &Value) {
        self.clone_from(src);
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::null()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::with_number(IecType::Bool, value.into())
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Self::with_number(IecType::SInt, Number::Int(value.into()))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Self::with_number(IecType::Int, Number::Int(value.into()))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::with_number(IecType::DInt, Number::Int(value.into()))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::with_number(IecType::LInt, value.into())
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::with_number(IecType::USInt, Number::Int(value.into()))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::with_number(IecType::UInt, Number::Int(value.into()))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::with_number(IecType::UDInt, Number::Int(value.into()))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::with_number(IecType::ULInt, value.into())
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::with_number(IecType::Real, Number::Real(value.into()))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::with_number(IecType::LReal, value.into())
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        let mut out = Self::new(IecType::Time);
        out.payload = Payload::Time(value);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retype_keeps_flags_and_refreshes_class() {
        let mut value = Value::from(12_i16);
        value.set_attribute(Attributes::RETAIN, true);
        value.set_state(StateFlags::FLAG1, true);
        value.to_type(IecType::LReal);
        assert_eq!(value.class(), classify(IecType::LReal));
        assert!(value.attributes().contains(Attributes::RETAIN));
        assert!(value.has_state(StateFlags::FLAG1));
        assert_eq!(value.number(), Some(Number::Real(12.0)));
    }

    #[test]
    fn retype_from_string_drops_text() {
        let mut value = Value::string("abc", false, false);
        value.to_type(IecType::DInt);
        assert_eq!(value.payload(), &Payload::DInt(0));
    }

    #[test]
    fn set_payload_rejects_foreign_shape() {
        let mut value = Value::new(IecType::Int);
        assert!(!value.set_payload(Payload::Bool(true)));
        assert!(value.set_payload(Payload::Int(5)));
        assert_eq!(value.as_i64(), 5);
    }
}
