use crate::error::{IecError, Status};
use crate::stack::OperandStack;
use crate::value::{AnyClass, IecType, Value};

use super::validate::guard;

/// The higher-ranked of two tags.
pub(crate) fn wider(a: IecType, b: IecType) -> IecType {
    if b.ordinal() > a.ordinal() {
        b
    } else {
        a
    }
}

/// Promotes `result` towards `ty`. A result without a numeric view (NULL,
/// strings, tables, timers) is retyped outright.
pub(crate) fn promote_result(result: &mut Value, ty: IecType) {
    if result.number().is_none() {
        result.to_type(ty);
    } else {
        result.promote(ty);
    }
}

/// Empties `operands` and checks every one of them against `allowed`.
///
/// Operands come back in pop order. The stack is empty on every return.
pub(crate) fn drain_checked<'a>(
    op: &'static str,
    operands: &mut OperandStack<'a>,
    allowed: AnyClass,
) -> Result<Vec<&'a Value>, IecError> {
    let items = operands.drain();
    if items.is_empty() {
        return Err(IecError::NullParameter);
    }
    items
        .iter()
        .try_for_each(|item| guard(op, item, allowed))?;
    Ok(items)
}

/// Checks both operands of a binary operator against `allowed`.
pub(crate) fn guard_pair(op: &'static str, a: &Value, b: &Value, allowed: AnyClass) -> Status {
    guard(op, a, allowed)?;
    guard(op, b, allowed)
}

/// Empties `operands` and returns the `N` most recently pushed, in push
/// order. Anything pushed below them is discarded.
pub(crate) fn pop_args<'a, const N: usize>(
    operands: &mut OperandStack<'a>,
) -> Result<[&'a Value; N], IecError> {
    let popped = operands.drain();
    if popped.len() < N {
        return Err(IecError::NullParameter);
    }
    Ok(std::array::from_fn(|index| popped[N - 1 - index]))
}
