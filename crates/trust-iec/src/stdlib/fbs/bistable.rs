use crate::error::Status;
use crate::stdlib::validate::guard_exact;
use crate::value::{Attributes, IecType, Value};

/// Set-dominant bistable: `Q1 := S1 OR (Q1 AND NOT R)`.
pub fn sr(q1: &mut Value, s1: &Value, r: &Value) -> Status {
    guard_exact("SR", s1, IecType::Bool)?;
    guard_exact("SR", r, IecType::Bool)?;
    let state = latch_output(q1);
    q1.set_bool(s1.as_bool() || (state && !r.as_bool()));
    Ok(())
}

/// Reset-dominant bistable: `Q1 := (Q1 OR S) AND NOT R1`.
pub fn rs(q1: &mut Value, s: &Value, r1: &Value) -> Status {
    guard_exact("RS", s, IecType::Bool)?;
    guard_exact("RS", r1, IecType::Bool)?;
    let state = latch_output(q1);
    q1.set_bool((state || s.as_bool()) && !r1.as_bool());
    Ok(())
}

/// Forces the output to a maintained BOOL and returns its current state.
pub(super) fn latch_output(q: &mut Value) -> bool {
    q.to_type(IecType::Bool);
    q.set_attribute(Attributes::MAINTAIN, true);
    q.as_bool()
}
