use tracing::debug;

use crate::clock::Clock;
use crate::error::{IecError, Status};
use crate::stdlib::validate::guard_exact;
use crate::value::{Duration, IecType, StateFlags, TimerState, Value};

/// Pulse timer: a rising `input` starts a pulse of length `pt`. `q` is true
/// while `0 < et < pt`, regardless of `input`. Elapsed time holds until
/// `input` drops, then clears so the next rising edge can retrigger.
pub fn tp(
    timer: &mut Value,
    input: &Value,
    pt: &Value,
    et: Option<&mut Value>,
    clock: &dyn Clock,
) -> Status {
    let (input, state) = prepare("TP", timer, input, pt, et.as_deref())?;
    let now = clock.now();

    if input && !state.running && state.et == Duration::ZERO {
        debug!("TP pulse started");
        state.running = true;
        state.t0 = now;
    }
    if state.running {
        state.et = elapsed(state, now);
        if state.et >= state.pt {
            debug!("TP pulse finished");
            state.running = false;
        }
    }
    state.q = state.running && state.et > Duration::ZERO && state.et < state.pt;
    if !input && !state.running && state.et != Duration::ZERO {
        state.et = Duration::ZERO;
        state.t0 = Duration::ZERO;
    }

    publish(*state, et);
    Ok(())
}

/// On-delay timer: `q` rises once `input` has been true for `pt`.
pub fn ton(
    timer: &mut Value,
    input: &Value,
    pt: &Value,
    et: Option<&mut Value>,
    clock: &dyn Clock,
) -> Status {
    let (input, state) = prepare("TON", timer, input, pt, et.as_deref())?;

    if input {
        let now = clock.now();
        if !state.running {
            debug!("TON started");
            state.running = true;
            state.t0 = now;
        }
        state.et = elapsed(state, now);
        let expired = state.et >= state.pt;
        if expired && !state.q {
            debug!("TON expired");
        }
        state.q = expired;
    } else {
        *state = TimerState::armed(state.pt);
    }

    publish(*state, et);
    Ok(())
}

/// Off-delay timer: `q` follows a true `input` and falls `pt` after
/// `input` drops.
pub fn tof(
    timer: &mut Value,
    input: &Value,
    pt: &Value,
    et: Option<&mut Value>,
    clock: &dyn Clock,
) -> Status {
    let (input, state) = prepare("TOF", timer, input, pt, et.as_deref())?;

    if input {
        state.q = true;
        state.et = Duration::ZERO;
        state.t0 = Duration::ZERO;
        state.running = false;
    } else if state.q {
        let now = clock.now();
        if !state.running {
            debug!("TOF started");
            state.running = true;
            state.t0 = now;
        }
        state.et = elapsed(state, now);
        if state.et >= state.pt {
            debug!("TOF expired");
            state.q = false;
            state.running = false;
        }
    }

    publish(*state, et);
    Ok(())
}

/// Validates the call, runs the one-time initialisation and refreshes the
/// preset. Nothing is mutated when validation fails.
fn prepare<'t>(
    op: &'static str,
    timer: &'t mut Value,
    input: &Value,
    pt: &Value,
    et: Option<&Value>,
) -> Result<(bool, &'t mut TimerState), IecError> {
    guard_exact(op, input, IecType::Bool)?;
    guard_exact(op, pt, IecType::Time)?;
    guard_exact(op, timer, IecType::Timer)?;
    if let Some(et) = et {
        guard_exact(op, et, IecType::Time)?;
    }
    let preset = pt.as_duration().unwrap_or(Duration::ZERO);
    let initialized = timer.has_state(StateFlags::INITIALIZED);
    timer.set_state(StateFlags::INITIALIZED, true);
    let state = timer.timer_mut().ok_or(IecError::NotAllowedType)?;
    if !initialized {
        *state = TimerState::armed(preset);
    }
    state.pt = preset;
    Ok((input.as_bool(), state))
}

/// Time since `t0`, capped at the preset.
fn elapsed(state: &TimerState, now: Duration) -> Duration {
    now.saturating_sub(state.t0).min(state.pt)
}

fn publish(state: TimerState, et: Option<&mut Value>) {
    if let Some(et) = et {
        et.set_duration(state.et);
    }
}
