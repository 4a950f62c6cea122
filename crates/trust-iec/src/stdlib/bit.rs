//! Bit shift/rotate and bitwise boolean functions.

#![allow(missing_docs)]

use crate::error::Status;
use crate::value::{AnyClass, Number, Value};

use super::helpers::{guard_pair, pop_args, promote_result, wider};
use super::validate::guard;
use super::StandardLibrary;

pub fn register(lib: &mut StandardLibrary) {
    lib.register("SHL", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        shl(result, v1, v2)
    });
    lib.register("SHR", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        shr(result, v1, v2)
    });
    lib.register("ROL", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        rol(result, v1, v2)
    });
    lib.register("ROR", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        ror(result, v1, v2)
    });
    lib.register("AND", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        and(result, v1, v2)
    });
    lib.register("OR", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        or(result, v1, v2)
    });
    lib.register("XOR", |result, operands| {
        let [v1, v2] = pop_args(operands)?;
        xor(result, v1, v2)
    });
    lib.register("NOT", |result, operands| {
        let [v1] = pop_args(operands)?;
        not(result, v1)
    });
}

/// Shift left by `v2` bits; a negative `v2` shifts right.
pub fn shl(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    shift("SHL", result, v1, v2, true)
}

/// Shift right by `v2` bits; a negative `v2` shifts left. Signed values
/// shift arithmetically.
pub fn shr(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    shift("SHR", result, v1, v2, false)
}

/// Rotate left within `v1`'s bit width; a negative `v2` rotates right.
pub fn rol(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    rotate("ROL", result, v1, v2, true)
}

pub fn ror(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    rotate("ROR", result, v1, v2, false)
}

pub fn and(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    bitwise("AND", result, v1, v2, |a, b| a & b)
}

pub fn or(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    bitwise("OR", result, v1, v2, |a, b| a | b)
}

pub fn xor(result: &mut Value, v1: &Value, v2: &Value) -> Status {
    bitwise("XOR", result, v1, v2, |a, b| a ^ b)
}

/// Bitwise complement; logical negation for booleans.
pub fn not(result: &mut Value, v1: &Value) -> Status {
    guard("NOT", v1, AnyClass::BIT | AnyClass::INT)?;
    promote_result(result, v1.ty());
    let value = if v1.ty().is_boolean() {
        i128::from(!v1.as_bool())
    } else {
        !v1.number_or_zero().as_i128()
    };
    result.set_number(Number::Int(value));
    Ok(())
}

fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1_u64 << width) - 1
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn low_bits(value: i128, width: u32) -> u64 {
    (value as u64) & width_mask(width)
}

fn shift(
    op: &'static str,
    result: &mut Value,
    v1: &Value,
    v2: &Value,
    left_when_positive: bool,
) -> Status {
    guard(op, v1, AnyClass::INTEGRAL)?;
    guard(op, v2, AnyClass::NUM)?;
    let width = v1.ty().bit_width();
    let amount = v2.number_or_zero().as_i128();
    let count = u32::try_from(amount.unsigned_abs()).unwrap_or(u32::MAX);
    let value = v1.number_or_zero().as_i128();
    let shifted = if (amount >= 0) == left_when_positive {
        value.checked_shl(count).unwrap_or(0)
    } else {
        value
            .checked_shr(count)
            .unwrap_or(if value < 0 { -1 } else { 0 })
    };
    promote_result(result, v1.ty());
    result.set_number(Number::Int(low_bits(shifted, width).into()));
    Ok(())
}

fn rotate(
    op: &'static str,
    result: &mut Value,
    v1: &Value,
    v2: &Value,
    left_when_positive: bool,
) -> Status {
    guard(op, v1, AnyClass::INTEGRAL)?;
    guard(op, v2, AnyClass::NUM)?;
    let width = v1.ty().bit_width();
    let amount = v2.number_or_zero().as_i128();
    let rotated = match width {
        1 | 8 | 16 | 32 | 64 => {
            let bits = low_bits(v1.number_or_zero().as_i128(), width);
            let k = u32::try_from(amount.unsigned_abs() % u128::from(width)).unwrap_or(0);
            let k = if (amount >= 0) == left_when_positive {
                k
            } else {
                (width - k) % width
            };
            if k == 0 {
                bits
            } else {
                ((bits << k) | (bits >> (width - k))) & width_mask(width)
            }
        }
        _ => 0,
    };
    promote_result(result, v1.ty());
    result.set_number(Number::Int(rotated.into()));
    Ok(())
}

fn bitwise(
    op: &'static str,
    result: &mut Value,
    v1: &Value,
    v2: &Value,
    combine: fn(i128, i128) -> i128,
) -> Status {
    guard_pair(op, v1, v2, AnyClass::BIT | AnyClass::INT)?;
    promote_result(result, wider(v1.ty(), v2.ty()));
    let value = combine(
        v1.number_or_zero().as_i128(),
        v2.number_or_zero().as_i128(),
    );
    result.set_number(Number::Int(value));
    Ok(())
}
