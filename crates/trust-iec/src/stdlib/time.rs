//! TIME arithmetic.

#![allow(missing_docs)]

use crate::error::{IecError, Status};
use crate::value::{AnyClass, Duration, IecType, Number, Value};

use super::helpers::pop_args;
use super::validate::{guard, guard_exact};
use super::StandardLibrary;

pub fn register(lib: &mut StandardLibrary) {
    lib.register("ADD_TIME", |result, operands| {
        let [a, b] = pop_args(operands)?;
        add_time(result, a, b)
    });
    lib.register("SUB_TIME", |result, operands| {
        let [a, b] = pop_args(operands)?;
        sub_time(result, a, b)
    });
    lib.register("MUL_TIME", |result, operands| {
        let [t, k] = pop_args(operands)?;
        mul_time(result, t, k)
    });
    lib.register("DIV_TIME", |result, operands| {
        let [t, k] = pop_args(operands)?;
        div_time(result, t, k)
    });
}

pub fn add_time(result: &mut Value, a: &Value, b: &Value) -> Status {
    let (a, b) = time_pair("ADD_TIME", a, b)?;
    result.set_duration(a.saturating_add(b));
    Ok(())
}

pub fn sub_time(result: &mut Value, a: &Value, b: &Value) -> Status {
    let (a, b) = time_pair("SUB_TIME", a, b)?;
    result.set_duration(a.saturating_sub(b));
    Ok(())
}

/// Scales a duration by a number.
pub fn mul_time(result: &mut Value, t: &Value, k: &Value) -> Status {
    let t = time_of("MUL_TIME", t)?;
    guard("MUL_TIME", k, AnyClass::NUM)?;
    let nanos = match k.number_or_zero() {
        Number::Int(factor) => saturate(i128::from(t.as_nanos()).saturating_mul(factor)),
        Number::Real(factor) => real_nanos(t, |nanos| nanos * factor),
    };
    result.set_duration(Duration::from_nanos(nanos));
    Ok(())
}

/// Divides a duration by a non-zero number.
pub fn div_time(result: &mut Value, t: &Value, k: &Value) -> Status {
    let t = time_of("DIV_TIME", t)?;
    guard("DIV_TIME", k, AnyClass::NUM)?;
    let divisor = k.number_or_zero();
    if divisor.is_zero() {
        return Err(IecError::NotAllowedType);
    }
    let nanos = match divisor {
        Number::Int(divisor) => saturate(i128::from(t.as_nanos()) / divisor),
        Number::Real(divisor) => real_nanos(t, |nanos| nanos / divisor),
    };
    result.set_duration(Duration::from_nanos(nanos));
    Ok(())
}

fn time_of(op: &'static str, value: &Value) -> Result<Duration, IecError> {
    guard_exact(op, value, IecType::Time)?;
    value.as_duration().ok_or(IecError::NotAllowedType)
}

fn time_pair(op: &'static str, a: &Value, b: &Value) -> Result<(Duration, Duration), IecError> {
    Ok((time_of(op, a)?, time_of(op, b)?))
}

fn saturate(nanos: i128) -> i64 {
    i64::try_from(nanos).unwrap_or(if nanos < 0 { i64::MIN } else { i64::MAX })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn real_nanos(t: Duration, scale: impl Fn(f64) -> f64) -> i64 {
    scale(t.as_nanos() as f64) as i64
}
