use tracing::debug;

use crate::error::Status;
use crate::stdlib::validate::guard_exact;
use crate::value::{IecType, Number, Value};

/// Up counter. `cu` carries an already detected rising edge.
pub fn ctu(q: &mut Value, cu: &Value, r: &Value, pv: &Value, cv: &mut Value) -> Status {
    guard_exact("CTU", cu, IecType::REdge)?;
    guard_exact("CTU", r, IecType::Bool)?;
    guard_exact("CTU", pv, IecType::Int)?;
    guard_exact("CTU", cv, IecType::Int)?;
    q.to_type(IecType::Bool);

    let preset = pv.as_i64();
    if r.as_bool() {
        debug!("CTU reset");
        cv.set_number(Number::Int(0));
    } else if cu.as_bool() && cv.as_i64() < preset {
        cv.set_number(Number::from(cv.as_i64() + 1));
    }
    q.set_bool(cv.as_i64() >= preset);
    Ok(())
}

/// Down counter. `cd` carries an already detected rising edge.
pub fn ctd(q: &mut Value, cd: &Value, ld: &Value, pv: &Value, cv: &mut Value) -> Status {
    guard_exact("CTD", cd, IecType::REdge)?;
    guard_exact("CTD", ld, IecType::Bool)?;
    guard_exact("CTD", pv, IecType::Int)?;
    guard_exact("CTD", cv, IecType::Int)?;
    q.to_type(IecType::Bool);

    if ld.as_bool() {
        debug!(pv = pv.as_i64(), "CTD load");
        cv.set_number(pv.number_or_zero());
    } else if cd.as_bool() && cv.as_i64() > 0 {
        cv.set_number(Number::from(cv.as_i64() - 1));
    }
    q.set_bool(cv.as_i64() <= 0);
    Ok(())
}
