//! Monotonic clocks read by the timer blocks.

#![allow(missing_docs)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::config::ClockConfig;
use crate::value::Duration;

/// Monotonic, non-blocking time source.
pub trait Clock: Send + Sync {
    /// Current reading since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Granularity at which [`StdClock`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockResolution {
    /// Whole milliseconds.
    #[default]
    Millis,
    /// Whole microseconds.
    Micros,
}

impl ClockResolution {
    #[must_use]
    pub fn as_duration(self) -> Duration {
        match self {
            Self::Millis => Duration::from_millis(1),
            Self::Micros => Duration::from_micros(1),
        }
    }
}

/// Monotonic clock based on `std::time::Instant`.
#[derive(Debug, Clone)]
pub struct StdClock {
    start: std::time::Instant,
    resolution: ClockResolution,
}

impl StdClock {
    #[must_use]
    pub fn new() -> Self {
        Self::with_resolution(ClockResolution::default())
    }

    #[must_use]
    pub fn with_resolution(resolution: ClockResolution) -> Self {
        Self {
            start: std::time::Instant::now(),
            resolution,
        }
    }

    /// Clock reporting at the configured resolution.
    #[must_use]
    pub fn from_config(config: &ClockConfig) -> Self {
        Self::with_resolution(config.resolution)
    }

    #[must_use]
    pub const fn resolution(&self) -> ClockResolution {
        self.resolution
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now(&self) -> Duration {
        Duration::from(self.start.elapsed()).truncate_to(self.resolution.as_duration())
    }
}

/// Deterministic clock for tests and simulations. Clones share one reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicI64>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance time by the given delta, returning the new reading.
    pub fn advance(&self, delta: Duration) -> Duration {
        let prev = self
            .nanos
            .fetch_add(delta.as_nanos(), Ordering::SeqCst);
        Duration::from_nanos(prev.saturating_add(delta.as_nanos()))
    }

    pub fn set_time(&self, time: Duration) {
        self.nanos.store(time.as_nanos(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_millis(40));
        assert_eq!(clock.now(), Duration::from_millis(40));
        clock.set_time(Duration::from_secs(2));
        assert_eq!(handle.now(), Duration::from_secs(2));
    }

    #[test]
    fn std_clock_reports_whole_units() {
        let clock = StdClock::with_resolution(ClockResolution::Millis);
        let now = clock.now();
        assert_eq!(now.as_nanos() % 1_000_000, 0);
    }
}
