//! Comparison functions.

#![allow(missing_docs)]

use std::cmp::Ordering;

use crate::error::Status;
use crate::value::{AnyClass, IecType, Value};

use super::helpers::{guard_pair, pop_args};
use super::StandardLibrary;

pub fn register(lib: &mut StandardLibrary) {
    lib.register("GT", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        gt(result, v1, v2)
    });
    lib.register("GE", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        ge(result, v1, v2)
    });
    lib.register("EQ", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        eq(result, v1, v2)
    });
    lib.register("LE", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        le(result, v1, v2)
    });
    lib.register("LT", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        lt(result, v1, v2)
    });
    lib.register("NE", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        ne(result, v1, v2)
    });
}

pub fn gt(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    compare("GT", result, v1, v2, |ord| ord == Some(Ordering::Greater))
}

pub fn ge(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    compare("GE", result, v1, v2, |ord| {
        matches!(ord, Some(Ordering::Greater | Ordering::Equal))
    })
}

pub fn eq(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    compare("EQ", result, v1, v2, |ord| ord == Some(Ordering::Equal))
}

pub fn le(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    compare("LE", result, v1, v2, |ord| {
        matches!(ord, Some(Ordering::Less | Ordering::Equal))
    })
}

pub fn lt(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    compare("LT", result, v1, v2, |ord| ord == Some(Ordering::Less))
}

/// Unordered operands (NaN) compare not-equal.
pub fn ne(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    compare("NE", result, v1, v2, |ord| ord != Some(Ordering::Equal))
}

/// Orders two elementary values by their numeric view; two strings compare
/// by text.
fn ordering(v1: &Value, v2: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (v1.as_str(), v2.as_str()) {
        return Some(a.cmp(b));
    }
    v1.number_or_zero().compare(v2.number_or_zero())
}

fn compare(
    op: &'static str,
    result: &mut Value,
    v1: &Value,
    v2: &Value,
    test: fn(Option<Ordering>) -> bool,
) -> Status {
    guard_pair(op, v1, v2, AnyClass::ELEMENTARY)?;
    let outcome = test(ordering(v1, v2));
    result.to_type(IecType::Bool);
    result.set_bool(outcome);
    Ok(())
}
