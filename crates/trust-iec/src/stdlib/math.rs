//! ABS and the real-valued numeric functions.

#![allow(missing_docs)]

use crate::error::Status;
use crate::value::{AnyClass, Number, Value};

use super::helpers::{guard_pair, pop_args, promote_result, wider};
use super::validate::guard;
use super::StandardLibrary;

macro_rules! unary_real {
    ($($(#[$doc:meta])* $name:ident => $op:literal, $f:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(result: &mut Value, v1: &Value) -> Status {
                unary_real($op, result, v1, $f)
            }
        )*

        fn register_unary(lib: &mut StandardLibrary) {
            $(
                lib.register($op, |result, operands| {
                    let [v1] = pop_args(operands)?;
                    $name(result, v1)
                });
            )*
        }
    };
}

unary_real! {
    sqrt => "SQRT", f64::sqrt;
    /// Natural logarithm.
    ln => "LN", f64::ln;
    /// Base-10 logarithm.
    log => "LOG", f64::log10;
    exp => "EXP", f64::exp;
    sin => "SIN", f64::sin;
    cos => "COS", f64::cos;
    tan => "TAN", f64::tan;
    asin => "ASIN", f64::asin;
    acos => "ACOS", f64::acos;
    atan => "ATAN", f64::atan;
}

pub fn register(lib: &mut StandardLibrary) {
    lib.register("ABS", |result, operands| {
        let [v1] = pop_args(operands)?;
        abs(result, v1)
    });
    register_unary(lib);
    lib.register("ATAN2", |result, operands| {
        let [y, x] = pop_args(operands)?;
        atan2(result, y, x)
    });
}

/// Absolute value at `v1`'s type.
pub fn abs(result: &mut Value, v1: &Value) -> Status {
    guard("ABS", v1, AnyClass::MAGNITUDE)?;
    promote_result(result, v1.ty());
    result.set_number(v1.number_or_zero().abs());
    Ok(())
}

/// Angle of the point `(x, y)`.
pub fn atan2(result: &mut Value, y: &Value, x: &Value) -> Status {
    guard_pair("ATAN2", y, x, AnyClass::REAL)?;
    promote_result(result, wider(y.ty(), x.ty()));
    result.set_number(Number::Real(y.as_f64().atan2(x.as_f64())));
    Ok(())
}

fn unary_real(op: &'static str, result: &mut Value, v1: &Value, f: fn(f64) -> f64) -> Status {
    guard(op, v1, AnyClass::REAL)?;
    promote_result(result, v1.ty());
    result.set_number(Number::Real(f(v1.as_f64())));
    Ok(())
}
