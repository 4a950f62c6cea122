#![allow(missing_docs)]

/// Duration with nanosecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    nanos: i64,
}

impl Duration {
    pub const ZERO: Self = Self { nanos: 0 };

    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self {
            nanos: micros.saturating_mul(1_000),
        }
    }

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            nanos: millis.saturating_mul(1_000_000),
        }
    }

    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self {
            nanos: secs.saturating_mul(1_000_000_000),
        }
    }

    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    #[must_use]
    pub const fn as_micros(self) -> i64 {
        self.nanos / 1_000
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.nanos / 1_000_000
    }

    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            nanos: self.nanos.saturating_add(other.nanos),
        }
    }

    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self {
            nanos: self.nanos.saturating_sub(other.nanos),
        }
    }

    /// Rounds down to a multiple of `resolution` (no-op for non-positive
    /// resolutions).
    #[must_use]
    pub const fn truncate_to(self, resolution: Self) -> Self {
        if resolution.nanos <= 0 {
            return self;
        }
        Self {
            nanos: self.nanos - self.nanos.rem_euclid(resolution.nanos),
        }
    }
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Self::from_nanos(i64::try_from(value.as_nanos()).unwrap_or(i64::MAX))
    }
}

/// DATE value stored as milliseconds since 1970-01-01 at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DateValue {
    ticks: i64,
}

impl DateValue {
    #[must_use]
    pub const fn new(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Builds a date from a civil calendar day.
    #[must_use]
    pub fn from_ymd(year: i64, month: i64, day: i64) -> Option<Self> {
        days_from_civil(year, month, day)?
            .checked_mul(MILLIS_PER_DAY)
            .map(Self::new)
    }

    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.ticks
    }
}

/// TIME_OF_DAY value stored as milliseconds since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDayValue {
    ticks: i64,
}

impl TimeOfDayValue {
    #[must_use]
    pub const fn new(ticks: i64) -> Self {
        Self { ticks }
    }

    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.ticks
    }
}

/// DATE_AND_TIME value stored as milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DateTimeValue {
    ticks: i64,
}

impl DateTimeValue {
    #[must_use]
    pub const fn new(ticks: i64) -> Self {
        Self { ticks }
    }

    #[must_use]
    pub fn from_parts(date: DateValue, time: TimeOfDayValue) -> Option<Self> {
        date.ticks().checked_add(time.ticks()).map(Self::new)
    }

    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.ticks
    }
}

pub(crate) const MILLIS_PER_DAY: i64 = 86_400_000;

/// Years accepted by the civil-date conversion.
const YEAR_RANGE: std::ops::RangeInclusive<i64> = -1_000_000..=1_000_000;

/// Days between 1970-01-01 and a civil date (proleptic Gregorian).
pub(crate) fn days_from_civil(year: i64, month: i64, day: i64) -> Option<i64> {
    if !YEAR_RANGE.contains(&year)
        || !(1..=12).contains(&month)
        || !(1..=days_in_month(year, month)).contains(&day)
    {
        return None;
    }
    let y = year - i64::from(month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = month + if month > 2 { -3 } else { 9 };
    let doy = (153 * m + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    Some(era * 146_097 + doe - 719_468)
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
