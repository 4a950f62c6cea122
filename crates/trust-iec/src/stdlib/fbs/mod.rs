//! Standard function blocks. Instance state lives in the output or timer
//! values passed by the caller.

#![allow(missing_docs)]

mod bistable;
mod counters;
mod timers;
mod triggers;

pub use bistable::{rs, sr};
pub use counters::{ctd, ctu};
pub use timers::{tof, ton, tp};
pub use triggers::{f_trig, r_trig};
