//! Selection functions: MOVE, SEL, MAX, MIN, LIMIT and MUX.

#![allow(missing_docs)]

use std::cmp::Ordering;

use crate::error::{IecError, Status};
use crate::stack::OperandStack;
use crate::value::{AnyClass, IecType, Value};

use super::helpers::{drain_checked, pop_args};
use super::validate::{guard, guard_exact};
use super::StandardLibrary;

pub fn register(lib: &mut StandardLibrary) {
    lib.register("MOVE", |result, operands| {
        let [src] = pop_args(operands)?;
        mov(result, src)
    });
    lib.register("SEL", |result, operands| {
        let [g, in0, in1] = pop_args(operands)?;
        sel(result, g, in0, in1)
    });
    lib.register("MAX", max);
    lib.register("MIN", min);
    lib.register("LIMIT", |result, operands| {
        let [mn, value, mx] = pop_args(operands)?;
        limit(result, value, mn, mx)
    });
    lib.register("MUX", mux_in_push_order);
}

/// Copies `src` into `dest`: tag, flags and payload.
pub fn mov(dest: &mut Value, src: &Value) -> Status {
    dest.move_from(src);
    Ok(())
}

/// `if_true` when `cond` is set, `if_false` otherwise.
pub fn sel(result: &mut Value, cond: &Value, if_false: &Value, if_true: &Value) -> Status {
    guard_exact("SEL", cond, IecType::Bool)?;
    result.move_from(if cond.as_bool() { if_true } else { if_false });
    Ok(())
}

/// Largest stacked operand; ties keep the first popped.
pub fn max(result: &mut Value, operands: &mut OperandStack<'_>) -> Status {
    extreme("MAX", result, operands, Ordering::Greater)
}

/// Smallest stacked operand; ties keep the first popped.
pub fn min(result: &mut Value, operands: &mut OperandStack<'_>) -> Status {
    extreme("MIN", result, operands, Ordering::Less)
}

fn extreme(
    op: &'static str,
    result: &mut Value,
    operands: &mut OperandStack<'_>,
    wanted: Ordering,
) -> Status {
    let items = drain_checked(op, operands, AnyClass::NUM)?;
    let Some((first, rest)) = items.split_first() else {
        return Err(IecError::NullParameter);
    };
    let mut best = *first;
    for &item in rest {
        if item.number_or_zero().compare(best.number_or_zero()) == Some(wanted) {
            best = item;
        }
    }
    result.move_from(best);
    Ok(())
}

/// Clamps `value` into `[lo, hi]`.
pub fn limit(result: &mut Value, value: &Value, lo: &Value, hi: &Value) -> Status {
    guard("LIMIT", value, AnyClass::NUM)?;
    guard("LIMIT", lo, AnyClass::NUM)?;
    guard("LIMIT", hi, AnyClass::NUM)?;
    let current = value.number_or_zero();
    let chosen = if current.compare(lo.number_or_zero()) == Some(Ordering::Less) {
        lo
    } else if current.compare(hi.number_or_zero()) == Some(Ordering::Greater) {
        hi
    } else {
        value
    };
    result.move_from(chosen);
    Ok(())
}

/// Selects the operand at zero-based pop position `selector`. A
/// non-positive selector takes the first popped operand; running out of
/// operands keeps the last one popped. The remainder is discarded.
pub fn mux(result: &mut Value, selector: &Value, operands: &mut OperandStack<'_>) -> Status {
    if let Err(err) = guard("MUX", selector, AnyClass::INT) {
        operands.flush();
        return Err(err);
    }
    let items = operands.drain();
    let index = usize::try_from(selector.number_or_zero().as_i128()).unwrap_or(0);
    let chosen = items.get(index).or_else(|| items.last());
    match chosen {
        Some(value) => {
            result.move_from(value);
            Ok(())
        }
        None => Err(IecError::NullParameter),
    }
}

/// Registry form: the selector is pushed first, then `IN0`, `IN1`, ...
fn mux_in_push_order(result: &mut Value, operands: &mut OperandStack<'_>) -> Status {
    let mut pushed = operands.drain();
    pushed.reverse();
    let Some((selector, inputs)) = pushed.split_first() else {
        return Err(IecError::NullParameter);
    };
    let mut reordered: OperandStack<'_> = inputs.iter().rev().copied().collect();
    mux(result, selector, &mut reordered)
}
