//! Operand category and exact-type guards.

use tracing::debug;

use crate::error::{IecError, Status};
use crate::value::{AnyClass, IecType, Value};

/// Passes when `value` belongs to any of `classes`, or is absent.
pub fn require_any(value: Option<&Value>, classes: &[AnyClass]) -> Status {
    let Some(value) = value else {
        return Ok(());
    };
    let allowed = classes
        .iter()
        .fold(AnyClass::empty(), |acc, class| acc | *class);
    if value.is(allowed) {
        Ok(())
    } else {
        Err(IecError::NotAllowedType)
    }
}

/// Passes only when `value` is tagged exactly `ty`.
pub fn require_exact(value: &Value, ty: IecType) -> Status {
    if value.ty() == ty {
        Ok(())
    } else {
        Err(IecError::NotAllowedType)
    }
}

pub(crate) fn guard(op: &'static str, value: &Value, allowed: AnyClass) -> Status {
    require_any(Some(value), &[allowed]).inspect_err(|_| {
        debug!(op, ty = %value.ty(), "operand category rejected");
    })
}

pub(crate) fn guard_exact(op: &'static str, value: &Value, ty: IecType) -> Status {
    require_exact(value, ty).inspect_err(|_| {
        debug!(op, ty = %value.ty(), expected = %ty, "operand type rejected");
    })
}

/// Exact-type guard over a set of accepted tags.
pub(crate) fn guard_one_of(op: &'static str, value: &Value, accepted: &[IecType]) -> Status {
    if accepted.contains(&value.ty()) {
        return Ok(());
    }
    debug!(op, ty = %value.ty(), "operand type rejected");
    Err(IecError::NotAllowedType)
}
