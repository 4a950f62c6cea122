//! ADD, MUL, SUB, DIV, MOD and EXPT.

#![allow(missing_docs)]

use crate::config::ExptMode;
use crate::error::{IecError, Status};
use crate::stack::OperandStack;
use crate::value::{AnyClass, IecType, Number, Value};

use super::helpers::{drain_checked, guard_pair, pop_args, promote_result, wider};
use super::StandardLibrary;

pub fn register(lib: &mut StandardLibrary) {
    lib.register("ADD", add);
    lib.register("MUL", mul);
    lib.register("SUB", |result, operands| {
        let [a, b] = pop_args(operands)?;
        sub(result, a, b)
    });
    lib.register("DIV", |result, operands| {
        let [a, b] = pop_args(operands)?;
        div(result, a, b)
    });
    lib.register("MOD", |result, operands| {
        let [a, b] = pop_args(operands)?;
        modulo(result, a, b)
    });
    register_expt(lib, ExptMode::Power);
}

pub(crate) fn register_expt(lib: &mut StandardLibrary, mode: ExptMode) {
    match mode {
        ExptMode::Power => lib.register("EXPT", |result, operands| {
            let [a, b] = pop_args(operands)?;
            expt_with(result, a, b, ExptMode::Power)
        }),
        ExptMode::LegacyXor => lib.register("EXPT", |result, operands| {
            let [a, b] = pop_args(operands)?;
            expt_with(result, a, b, ExptMode::LegacyXor)
        }),
    }
}

/// Sum of every stacked operand. The first popped operand fixes the
/// starting type; each further operand may widen it.
pub fn add(result: &mut Value, operands: &mut OperandStack<'_>) -> Status {
    fold("ADD", result, operands, |a, b| a + b)
}

/// Product of every stacked operand.
pub fn mul(result: &mut Value, operands: &mut OperandStack<'_>) -> Status {
    fold("MUL", result, operands, |a, b| a * b)
}

fn fold(
    op: &'static str,
    result: &mut Value,
    operands: &mut OperandStack<'_>,
    combine: impl Fn(Number, Number) -> Number,
) -> Status {
    let items = drain_checked(op, operands, AnyClass::MAGNITUDE)?;
    let Some((first, rest)) = items.split_first() else {
        return Err(IecError::NullParameter);
    };
    result.move_from(first);
    for item in rest {
        result.promote(item.ty());
        let acc = combine(result.number_or_zero(), item.number_or_zero());
        result.set_number(acc);
    }
    Ok(())
}

pub fn sub(result: &mut Value, a: &Value, b: &Value) -> Status {
    guard_pair("SUB", a, b, AnyClass::MAGNITUDE)?;
    promote_result(result, wider(a.ty(), b.ty()));
    result.set_number(a.number_or_zero() - b.number_or_zero());
    Ok(())
}

/// `a / b` at the promoted type. A zero divisor fails before `result` is
/// touched.
pub fn div(result: &mut Value, a: &Value, b: &Value) -> Status {
    guard_pair("DIV", a, b, AnyClass::MAGNITUDE | AnyClass::NUM)?;
    let divisor = b.number_or_zero();
    if divisor.is_zero() {
        return Err(IecError::NotAllowedType);
    }
    promote_result(result, wider(a.ty(), b.ty()));
    let dividend = a.number_or_zero();
    let quotient = if result.is(AnyClass::REAL) {
        dividend.to_real() / divisor.to_real()
    } else {
        dividend / divisor
    };
    result.set_number(quotient);
    Ok(())
}

/// Integer remainder; a zero divisor yields 0.
pub fn modulo(result: &mut Value, a: &Value, b: &Value) -> Status {
    guard_pair("MOD", a, b, AnyClass::INT)?;
    promote_result(result, wider(a.ty(), b.ty()));
    result.set_number(a.number_or_zero() % b.number_or_zero());
    Ok(())
}

/// `a` raised to `b`, in LREAL.
pub fn expt(result: &mut Value, a: &Value, b: &Value) -> Status {
    expt_with(result, a, b, ExptMode::Power)
}

pub fn expt_with(result: &mut Value, a: &Value, b: &Value, mode: ExptMode) -> Status {
    guard_pair("EXPT", a, b, AnyClass::NUM)?;
    promote_result(result, IecType::LReal);
    let base = a.number_or_zero();
    let exponent = b.number_or_zero();
    let value = match mode {
        ExptMode::Power => base.as_f64().powf(exponent.as_f64()),
        #[allow(clippy::cast_precision_loss)]
        ExptMode::LegacyXor => (base.as_i128() ^ exponent.as_i128()) as f64,
    };
    result.set_number(Number::Real(value));
    Ok(())
}
