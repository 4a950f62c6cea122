//! String functions. Positions are 1-based, in characters.

#![allow(missing_docs)]

use crate::error::{IecError, Status};
use crate::stack::OperandStack;
use crate::value::{AnyClass, IecType, Number, Payload, Value};

use super::helpers::{drain_checked, pop_args};
use super::validate::guard;
use super::StandardLibrary;

pub fn register(lib: &mut StandardLibrary) {
    lib.register("LEN", |result, operands| {
        let [s] = pop_args(operands)?;
        len(result, s)
    });
    lib.register("LEFT", |result, operands| {
        let [s, n] = pop_args(operands)?;
        left(result, s, n)
    });
    lib.register("RIGHT", |result, operands| {
        let [s, n] = pop_args(operands)?;
        right(result, s, n)
    });
    lib.register("MID", |result, operands| {
        let [s, l, p] = pop_args(operands)?;
        mid(result, s, l, p)
    });
    lib.register("CONCAT", concat);
    lib.register("INSERT", |result, operands| {
        let [s, s2, p] = pop_args(operands)?;
        insert(result, s, s2, p)
    });
    lib.register("DELETE", |result, operands| {
        let [s, l, p] = pop_args(operands)?;
        delete(result, s, l, p)
    });
    lib.register("REPLACE", |result, operands| {
        let [s, s2, l, p] = pop_args(operands)?;
        replace(result, s, s2, l, p)
    });
    lib.register("FIND", |result, operands| {
        let [s, s2] = pop_args(operands)?;
        find(result, s, s2)
    });
}

/// Makes `result` a STRING (WSTRING when `wide`) owning `text`.
pub fn string_set(result: &mut Value, text: &str, wide: bool, hash: bool) -> Status {
    result.set_string(text, wide, hash);
    Ok(())
}

/// Character count of `s`, as UDINT.
pub fn len(result: &mut Value, s: &Value) -> Status {
    guard("LEN", s, AnyClass::STRING)?;
    let count = chars_of(s).len();
    result.to_type(IecType::UDInt);
    result.set_number(Number::Int(i128::try_from(count).unwrap_or(i128::MAX)));
    Ok(())
}

/// Leftmost `n` characters.
pub fn left(result: &mut Value, s: &Value, n: &Value) -> Status {
    guard("LEFT", s, AnyClass::STRING)?;
    guard("LEFT", n, AnyClass::INT)?;
    let chars = chars_of(s);
    let count = count_of(n).min(chars.len());
    store_like(result, s, chars[..count].iter().collect::<String>());
    Ok(())
}

/// Rightmost `n` characters.
pub fn right(result: &mut Value, s: &Value, n: &Value) -> Status {
    guard("RIGHT", s, AnyClass::STRING)?;
    guard("RIGHT", n, AnyClass::INT)?;
    let chars = chars_of(s);
    let count = count_of(n).min(chars.len());
    store_like(result, s, chars[chars.len() - count..].iter().collect::<String>());
    Ok(())
}

/// `l` characters starting at position `p`.
pub fn mid(result: &mut Value, s: &Value, l: &Value, p: &Value) -> Status {
    guard("MID", s, AnyClass::STRING)?;
    guard("MID", l, AnyClass::INT)?;
    guard("MID", p, AnyClass::INT)?;
    let chars = chars_of(s);
    let start = start_index(p, chars.len())?;
    let end = start.saturating_add(count_of(l)).min(chars.len());
    store_like(result, s, chars[start..end].iter().collect::<String>());
    Ok(())
}

/// Inserts `s2` after the `p`-th character of `s` (`p == 0` prepends).
pub fn insert(result: &mut Value, s: &Value, s2: &Value, p: &Value) -> Status {
    guard("INSERT", s, AnyClass::STRING)?;
    guard("INSERT", s2, AnyClass::CHARS)?;
    guard("INSERT", p, AnyClass::INT)?;
    let chars = chars_of(s);
    let at = count_of(p);
    if at > chars.len() || position_of(p) < 0 {
        return Err(IecError::OutOfRange);
    }
    let mut text: String = chars[..at].iter().collect();
    text.push_str(&text_of(s2));
    text.extend(&chars[at..]);
    store_like(result, s, text);
    Ok(())
}

/// Removes `l` characters starting at position `p`.
pub fn delete(result: &mut Value, s: &Value, l: &Value, p: &Value) -> Status {
    guard("DELETE", s, AnyClass::STRING)?;
    guard("DELETE", l, AnyClass::INT)?;
    guard("DELETE", p, AnyClass::INT)?;
    let chars = chars_of(s);
    let start = start_index(p, chars.len())?;
    let end = start.saturating_add(count_of(l)).min(chars.len());
    let text: String = chars[..start].iter().chain(&chars[end..]).collect();
    store_like(result, s, text);
    Ok(())
}

/// Replaces `l` characters at position `p` with the character `s2`.
pub fn replace(result: &mut Value, s: &Value, s2: &Value, l: &Value, p: &Value) -> Status {
    guard("REPLACE", s, AnyClass::STRING)?;
    guard("REPLACE", s2, AnyClass::CHAR)?;
    guard("REPLACE", l, AnyClass::INT)?;
    guard("REPLACE", p, AnyClass::INT)?;
    let chars = chars_of(s);
    let start = start_index(p, chars.len())?;
    let end = start.saturating_add(count_of(l)).min(chars.len());
    let mut text: String = chars[..start].iter().collect();
    text.push_str(&text_of(s2));
    text.extend(&chars[end..]);
    store_like(result, s, text);
    Ok(())
}

/// 1-based position of the first `s2` in `s`, or 0. The result is INT.
pub fn find(result: &mut Value, s: &Value, s2: &Value) -> Status {
    guard("FIND", s, AnyClass::STRING)?;
    guard("FIND", s2, AnyClass::CHAR)?;
    let needle = text_of(s2);
    let position = chars_of(s)
        .iter()
        .position(|c| needle.starts_with(*c))
        .map_or(0, |index| index + 1);
    result.to_type(IecType::Int);
    result.set_number(Number::Int(i128::try_from(position).unwrap_or(0)));
    Ok(())
}

/// Concatenates every stacked STRING or CHAR in push order.
pub fn concat(result: &mut Value, operands: &mut OperandStack<'_>) -> Status {
    let items = drain_checked("CONCAT", operands, AnyClass::STRING | AnyClass::CHAR)?;
    let wide = items.iter().any(|item| {
        matches!(item.ty(), IecType::WString | IecType::WChar)
    });
    let text: String = items.iter().rev().map(|item| text_of(item)).collect();
    result.set_string(text, wide, false);
    Ok(())
}

fn chars_of(value: &Value) -> Vec<char> {
    value.as_str().unwrap_or_default().chars().collect()
}

/// Text of a STRING or the single character of a CHAR/WCHAR.
fn text_of(value: &Value) -> String {
    match value.payload() {
        Payload::String(text) => text.as_str().to_string(),
        Payload::Char(code) => char::from(*code).to_string(),
        Payload::WChar(code) => char::from_u32(u32::from(*code))
            .map(String::from)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn position_of(value: &Value) -> i128 {
    value.number_or_zero().as_i128()
}

/// Non-negative count; negative inputs clamp to zero.
fn count_of(value: &Value) -> usize {
    usize::try_from(position_of(value)).unwrap_or(0)
}

/// Zero-based index of the 1-based position `p`, which must name an
/// existing character.
fn start_index(p: &Value, len: usize) -> Result<usize, IecError> {
    let position = position_of(p);
    let index = usize::try_from(position.saturating_sub(1)).map_err(|_| IecError::OutOfRange)?;
    if index >= len && len > 0 {
        return Err(IecError::OutOfRange);
    }
    Ok(index.min(len))
}

/// Stores `text` in `result` with the width and hashing of `template`.
fn store_like(result: &mut Value, template: &Value, text: String) {
    let hashed = matches!(template.payload(), Payload::String(s) if s.hash().is_some());
    result.set_string(text, template.ty() == IecType::WString, hashed);
}
