use crate::error::Status;
use crate::stdlib::validate::guard_exact;
use crate::value::{IecType, StateFlags, Value};

use super::bistable::latch_output;

/// Rising edge: true for the one call where `clk` goes from false to true.
/// The previous sample lives in `q`'s FLAG1.
pub fn r_trig(q: &mut Value, clk: &Value) -> Status {
    guard_exact("R_TRIG", clk, IecType::Bool)?;
    latch_output(q);
    let clk = clk.as_bool();
    let prev = q.has_state(StateFlags::FLAG1);
    q.set_bool(clk && !prev);
    q.set_state(StateFlags::FLAG1, clk);
    Ok(())
}

/// Falling edge. FLAG1 holds the inverted previous sample, so a first call
/// with `clk` false reports an edge.
pub fn f_trig(q: &mut Value, clk: &Value) -> Status {
    guard_exact("F_TRIG", clk, IecType::Bool)?;
    latch_output(q);
    let low = !clk.as_bool();
    let prev_low = q.has_state(StateFlags::FLAG1);
    q.set_bool(low && !prev_low);
    q.set_state(StateFlags::FLAG1, low);
    Ok(())
}
