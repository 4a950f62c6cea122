//! Type conversion functions: `*_TO_*`, TRUNC and the BCD family.

#![allow(missing_docs)]

use crate::config::LiteralProfile;
use crate::error::{IecError, Status};
use crate::literal;
use crate::stack::OperandStack;
use crate::value::{AnyClass, IecType, Number, Value};

use super::helpers::pop_args;
use super::validate::{guard, guard_one_of};

/// Converts `v1` to `to_type`, keeping its value with native narrowing.
///
/// Strings convert through the literal parser in one direction and through
/// their decimal rendering in the other. Untyped text uses the default
/// literal profile; see [`to_with`].
pub fn to(result: &mut Value, v1: &Value, to_type: IecType) -> Status {
    to_with(result, v1, to_type, &LiteralProfile::default())
}

/// [`to`], resolving untyped text through `profile` before the final
/// narrowing to `to_type`.
pub fn to_with(
    result: &mut Value,
    v1: &Value,
    to_type: IecType,
    profile: &LiteralProfile,
) -> Status {
    guard("TO", v1, AnyClass::ELEMENTARY | AnyClass::CHAR)?;
    if !is_conversion_target(to_type) {
        return Err(IecError::TypeNotDefined);
    }
    let converted = if let Some(text) = v1.as_str() {
        from_text(text, to_type, profile)?
    } else if classify_is_string(to_type) {
        Value::string(render(v1), to_type == IecType::WString, false)
    } else {
        let mut copy = v1.clone();
        copy.to_type(to_type);
        copy
    };
    result.move_from(&converted);
    Ok(())
}

/// Truncates a real toward zero into an integer type.
pub fn trunc(result: &mut Value, v1: &Value, to_type: IecType) -> Status {
    guard("TRUNC", v1, AnyClass::REAL)?;
    if !crate::value::classify(to_type).contains(AnyClass::INT) {
        return Err(IecError::TypeNotDefined);
    }
    let truncated = Number::Int(v1.number_or_zero().as_i128());
    result.to_type(to_type);
    result.set_number(truncated);
    Ok(())
}

/// Packs the decimal digits of an unsigned value into nibbles.
pub fn to_bcd(result: &mut Value, v1: &Value, to_type: IecType) -> Status {
    guard("TO_BCD", v1, AnyClass::UNSIGNED)?;
    let digits = bcd_digits_for(to_type).ok_or(IecError::TypeNotDefined)?;
    let input = u64::try_from(v1.number_or_zero().as_i128()).map_err(|_| IecError::OutOfRange)?;
    let packed = u64_to_bcd(input, digits)?;
    result.to_type(to_type);
    result.set_number(Number::from(packed));
    Ok(())
}

/// Decodes a BCD bit string into an integer type.
pub fn bcd_to(result: &mut Value, v1: &Value, to_type: IecType) -> Status {
    guard_one_of("BCD_TO", v1, &BCD_TYPES)?;
    let digits = bcd_digits_for(v1.ty()).ok_or(IecError::NotAllowedType)?;
    if !crate::value::classify(to_type).contains(AnyClass::INT) {
        return Err(IecError::TypeNotDefined);
    }
    let bits = bit_pattern(v1);
    let decoded = bcd_to_u64(bits, digits)?;
    result.to_type(to_type);
    result.set_number(Number::from(decoded));
    Ok(())
}

/// True when every nibble of the bit string `v1` is a decimal digit.
pub fn is_valid_bcd(result: &mut Value, v1: &Value) -> Status {
    guard("IS_VALID_BCD", v1, AnyClass::BIT)?;
    let digits = usize::try_from(v1.ty().bit_width().div_ceil(4)).unwrap_or(0);
    let valid = bcd_to_u64(bit_pattern(v1), digits).is_ok();
    result.to_type(IecType::Bool);
    result.set_bool(valid);
    Ok(())
}

/// Resolves conversion names (`INT_TO_REAL`, `TO_LREAL`, `TRUNC_DINT`,
/// `WORD_BCD_TO_UINT`, `UINT_TO_BCD_WORD`, ...). `None` when `name` is not a
/// conversion.
pub(crate) fn call_conversion(
    name: &str,
    result: &mut Value,
    operands: &mut OperandStack<'_>,
    profile: &LiteralProfile,
) -> Option<Status> {
    let (source, kind, target) = parse_conversion_name(name)?;
    let target = IecType::from_name(target)?;
    let source = match source {
        Some(source) => Some(IecType::from_name(source)?),
        None => None,
    };
    let status = pop_args(operands).and_then(|[v1]| {
        if let Some(expected) = source {
            if v1.ty() != expected {
                return Err(IecError::NotAllowedType);
            }
        }
        match kind {
            ConversionKind::To => to_with(result, v1, target, profile),
            ConversionKind::Trunc => trunc(result, v1, target),
            ConversionKind::BcdTo => bcd_to(result, v1, target),
            ConversionKind::ToBcd => to_bcd(result, v1, target),
        }
    });
    Some(status)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConversionKind {
    To,
    Trunc,
    BcdTo,
    ToBcd,
}

fn parse_conversion_name(name: &str) -> Option<(Option<&str>, ConversionKind, &str)> {
    const FORMS: [(&str, ConversionKind); 4] = [
        ("BCD_TO_", ConversionKind::BcdTo),
        ("TO_BCD_", ConversionKind::ToBcd),
        ("TRUNC_", ConversionKind::Trunc),
        ("TO_", ConversionKind::To),
    ];
    for (marker, kind) in FORMS {
        if let Some(target) = name.strip_prefix(marker) {
            return Some((None, kind, target));
        }
        let infix = format!("_{marker}");
        if let Some(index) = name.find(&infix) {
            let source = &name[..index];
            let target = &name[index + infix.len()..];
            return Some((Some(source), kind, target));
        }
    }
    None
}

fn is_conversion_target(ty: IecType) -> bool {
    !matches!(
        ty,
        IecType::Null | IecType::Timer | IecType::Table | IecType::User | IecType::Pointer
    )
}

fn classify_is_string(ty: IecType) -> bool {
    crate::value::classify(ty).contains(AnyClass::STRING)
}

fn from_text(text: &str, to_type: IecType, profile: &LiteralProfile) -> Result<Value, IecError> {
    if classify_is_string(to_type) {
        return Ok(Value::string(text, to_type == IecType::WString, false));
    }
    let mut parsed = literal::parse_with(text, profile)?;
    parsed.to_type(to_type);
    Ok(parsed)
}

fn render(value: &Value) -> String {
    if value.ty().is_boolean() {
        return if value.as_bool() { "TRUE" } else { "FALSE" }.to_string();
    }
    if let Some(duration) = value.as_duration() {
        return format!("T#{}ms", duration.as_millis());
    }
    match value.number_or_zero() {
        Number::Int(v) => v.to_string(),
        Number::Real(v) => v.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bit_pattern(value: &Value) -> u64 {
    value.number_or_zero().as_i128() as u64
}

const BCD_TYPES: [IecType; 4] = [IecType::Byte, IecType::Word, IecType::DWord, IecType::LWord];

fn bcd_digits_for(ty: IecType) -> Option<usize> {
    match ty {
        IecType::Byte => Some(2),
        IecType::Word => Some(4),
        IecType::DWord => Some(8),
        IecType::LWord => Some(16),
        _ => None,
    }
}

fn u64_to_bcd(mut value: u64, digits: usize) -> Result<u64, IecError> {
    let mut packed = 0u64;
    for i in 0..digits {
        let digit = value % 10;
        value /= 10;
        packed |= digit << (i * 4);
    }
    if value != 0 {
        return Err(IecError::OutOfRange);
    }
    Ok(packed)
}

fn bcd_to_u64(value: u64, digits: usize) -> Result<u64, IecError> {
    let mut decoded = 0u64;
    let mut scale = 1u64;
    for i in 0..digits {
        let nibble = (value >> (i * 4)) & 0xf;
        if nibble > 9 {
            return Err(IecError::OutOfRange);
        }
        decoded += nibble * scale;
        scale = scale.saturating_mul(10);
    }
    Ok(decoded)
}
