//! Literal classification and materialization.
//!
//! A literal is normalized (trimmed, upper-cased) and then split into an
//! optional explicit type prefix (`INT#`), an optional format prefix (`16#`,
//! `T#`, `DT#`, ...) and a body. The body decides the [`LiteralKind`] when no
//! format prefix is present.

#![allow(missing_docs)]

use std::fmt;

use tracing::debug;

use crate::config::LiteralProfile;
use crate::error::IecError;
use crate::value::{
    classify as classify_type, AnyClass, DateTimeValue, DateValue, Duration, IecType, Number,
    Payload, TimeOfDayValue, Value,
};

/// Literal formats recognised by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Boolean,
    Integer,
    Real,
    RealExp,
    Base2,
    Base8,
    Base16,
    Duration,
    Date,
    TimeOfDay,
    DateAndTime,
}

impl LiteralKind {
    pub const ALL: [Self; 11] = [
        Self::Boolean,
        Self::Integer,
        Self::Real,
        Self::RealExp,
        Self::Base2,
        Self::Base8,
        Self::Base16,
        Self::Duration,
        Self::Date,
        Self::TimeOfDay,
        Self::DateAndTime,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::RealExp => "REAL_EXP",
            Self::Base2 => "BASE2",
            Self::Base8 => "BASE8",
            Self::Base16 => "BASE16",
            Self::Duration => "DURATION",
            Self::Date => "DATE",
            Self::TimeOfDay => "TIME_OF_DAY",
            Self::DateAndTime => "DATE_AND_TIME",
        }
    }

    const fn radix(self) -> Option<u32> {
        match self {
            Self::Base2 => Some(2),
            Self::Base8 => Some(8),
            Self::Base16 => Some(16),
            _ => None,
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified literal: its kind, the explicit type prefix if any, and the
/// body left after all prefixes are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub explicit: Option<IecType>,
    pub body: String,
}

const DATE_TIME_PREFIXES: [(&str, LiteralKind); 8] = [
    ("DATE_AND_TIME#", LiteralKind::DateAndTime),
    ("TIME_OF_DAY#", LiteralKind::TimeOfDay),
    ("DATE#", LiteralKind::Date),
    ("TIME#", LiteralKind::Duration),
    ("TOD#", LiteralKind::TimeOfDay),
    ("DT#", LiteralKind::DateAndTime),
    ("D#", LiteralKind::Date),
    ("T#", LiteralKind::Duration),
];

const BASE_PREFIXES: [(&str, LiteralKind); 3] = [
    ("16#", LiteralKind::Base16),
    ("8#", LiteralKind::Base8),
    ("2#", LiteralKind::Base2),
];

/// Classifies `text` without materializing it.
pub fn classify(text: &str) -> Result<Literal, IecError> {
    let upper = text.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return Err(IecError::Error);
    }

    if let Some(literal) = strip_date_time(&upper, None) {
        return Ok(literal);
    }

    let mut explicit = None;
    let mut rest = upper.as_str();
    if let Some((head, tail)) = upper.split_once('#') {
        if let Some(ty) = IecType::from_name(head) {
            explicit = Some(ty);
            rest = tail;
        }
    }
    if let Some(literal) = strip_date_time(rest, explicit) {
        return Ok(literal);
    }

    for (prefix, kind) in BASE_PREFIXES {
        if let Some(body) = rest.strip_prefix(prefix) {
            return Ok(Literal {
                kind,
                explicit,
                body: body.replace('_', ""),
            });
        }
    }

    let body = match rest.replace('_', "").as_str() {
        "TRUE" => "1".to_string(),
        "FALSE" => "0".to_string(),
        other => other.to_string(),
    };
    let kind = if body == "0" || body == "1" {
        LiteralKind::Boolean
    } else if body.contains('E') {
        LiteralKind::RealExp
    } else if body.contains('.') {
        LiteralKind::Real
    } else {
        LiteralKind::Integer
    };
    Ok(Literal {
        kind,
        explicit,
        body,
    })
}

fn strip_date_time(text: &str, explicit: Option<IecType>) -> Option<Literal> {
    DATE_TIME_PREFIXES.iter().find_map(|(prefix, kind)| {
        text.strip_prefix(prefix).map(|body| Literal {
            kind: *kind,
            explicit,
            body: body.to_string(),
        })
    })
}

/// Parses `text` with the default literal profile.
pub fn parse(text: &str) -> Result<Value, IecError> {
    parse_with(text, &LiteralProfile::default())
}

/// Parses `text`, resolving untyped literals through `profile`.
pub fn parse_with(text: &str, profile: &LiteralProfile) -> Result<Value, IecError> {
    let literal = classify(text)?;
    materialize(&literal, profile).inspect_err(|_| {
        debug!(text, kind = %literal.kind, "invalid literal");
    })
}

/// Builds the value a classified literal denotes.
pub fn materialize(literal: &Literal, profile: &LiteralProfile) -> Result<Value, IecError> {
    let body = literal.body.as_str();
    match literal.kind {
        LiteralKind::Boolean | LiteralKind::Integer => {
            let fallback = if literal.kind == LiteralKind::Boolean {
                IecType::Bool
            } else {
                profile.default_integer
            };
            let ty = numeric_target(literal.explicit, fallback)?;
            let n = body.parse::<i128>().map_err(|_| IecError::Error)?;
            Ok(Value::with_number(ty, Number::Int(n)))
        }
        LiteralKind::Real | LiteralKind::RealExp => {
            let ty = numeric_target(literal.explicit, profile.default_real)?;
            let x = body.parse::<f64>().map_err(|_| IecError::Error)?;
            Ok(Value::with_number(ty, Number::Real(x)))
        }
        LiteralKind::Base2 | LiteralKind::Base8 | LiteralKind::Base16 => {
            let ty = numeric_target(literal.explicit, profile.default_bits)?;
            let radix = literal.kind.radix().ok_or(IecError::Error)?;
            if body.starts_with(['+', '-']) {
                return Err(IecError::Error);
            }
            let n = i128::from_str_radix(body, radix).map_err(|_| IecError::Error)?;
            Ok(Value::with_number(ty, Number::Int(n)))
        }
        LiteralKind::Duration => {
            let mut value = Value::new(IecType::Time);
            value.set_duration(parse_duration(body)?);
            Ok(value)
        }
        LiteralKind::Date => {
            let date = parse_date(body)?;
            typed(IecType::Date, Payload::Date(date))
        }
        LiteralKind::TimeOfDay => {
            let tod = TimeOfDayValue::new(parse_time_of_day(body)?);
            typed(IecType::Tod, Payload::Tod(tod))
        }
        LiteralKind::DateAndTime => {
            let (date, tod) = body.rsplit_once('-').ok_or(IecError::Error)?;
            let date = parse_date(date)?;
            let tod = TimeOfDayValue::new(parse_time_of_day(tod)?);
            let dt = DateTimeValue::from_parts(date, tod).ok_or(IecError::Error)?;
            typed(IecType::Dt, Payload::Dt(dt))
        }
    }
}

fn numeric_target(explicit: Option<IecType>, fallback: IecType) -> Result<IecType, IecError> {
    let ty = explicit.unwrap_or(fallback);
    if classify_type(ty).intersects(AnyClass::MAGNITUDE | AnyClass::BIT) {
        Ok(ty)
    } else {
        Err(IecError::Error)
    }
}

fn typed(ty: IecType, payload: Payload) -> Result<Value, IecError> {
    let mut value = Value::new(ty);
    if value.set_payload(payload) {
        Ok(value)
    } else {
        Err(IecError::Error)
    }
}

/// `[+|-]` followed by `<number><unit>` groups, units D H M S MS US NS.
fn parse_duration(text: &str) -> Result<Duration, IecError> {
    let mut rest = text.trim();
    let mut sign = 1.0;
    if let Some(stripped) = rest.strip_prefix('-') {
        sign = -1.0;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }
    if rest.is_empty() {
        return Err(IecError::Error);
    }

    let bytes = rest.as_bytes();
    let mut idx = 0usize;
    let mut total = 0.0_f64;
    while idx < bytes.len() {
        let start = idx;
        while idx < bytes.len()
            && (bytes[idx].is_ascii_digit() || bytes[idx] == b'_' || bytes[idx] == b'.')
        {
            idx += 1;
        }
        if start == idx {
            return Err(IecError::Error);
        }
        let digits: String = rest[start..idx].chars().filter(|c| *c != '_').collect();
        let amount = digits.parse::<f64>().map_err(|_| IecError::Error)?;
        let unit_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_alphabetic() {
            idx += 1;
        }
        let nanos_per = match &rest[unit_start..idx] {
            "D" => 86_400_000_000_000.0,
            "H" => 3_600_000_000_000.0,
            "M" => 60_000_000_000.0,
            "S" => 1_000_000_000.0,
            "MS" => 1_000_000.0,
            "US" => 1_000.0,
            "NS" => 1.0,
            _ => return Err(IecError::Error),
        };
        total += amount * nanos_per;
        while idx < bytes.len() && bytes[idx] == b'_' {
            idx += 1;
        }
    }

    let nanos = (total * sign).round();
    if !nanos.is_finite() || nanos.abs() > i64::MAX as f64 {
        return Err(IecError::Error);
    }
    Ok(Duration::from_nanos(nanos as i64))
}

/// `YYYY-MM-DD`.
fn parse_date(text: &str) -> Result<DateValue, IecError> {
    let mut parts = text.split('-');
    let mut next = || -> Result<i64, IecError> {
        parts
            .next()
            .ok_or(IecError::Error)?
            .parse::<i64>()
            .map_err(|_| IecError::Error)
    };
    let (year, month, day) = (next()?, next()?, next()?);
    if parts.next().is_some() {
        return Err(IecError::Error);
    }
    DateValue::from_ymd(year, month, day).ok_or(IecError::Error)
}

/// `HH:MM:SS[.fff]`, in milliseconds since midnight.
fn parse_time_of_day(text: &str) -> Result<i64, IecError> {
    let mut parts = text.split(':');
    let hours = field(parts.next(), 24)?;
    let minutes = field(parts.next(), 60)?;
    let seconds = parts.next().ok_or(IecError::Error)?;
    if parts.next().is_some() {
        return Err(IecError::Error);
    }
    let (whole, frac) = seconds.split_once('.').unwrap_or((seconds, ""));
    let whole = field(Some(whole), 60)?;
    let millis = if frac.is_empty() {
        0
    } else {
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IecError::Error);
        }
        let mut padded: String = frac.chars().take(3).collect();
        while padded.len() < 3 {
            padded.push('0');
        }
        padded.parse::<i64>().map_err(|_| IecError::Error)?
    };
    Ok(((hours * 60 + minutes) * 60 + whole) * 1_000 + millis)
}

fn field(text: Option<&str>, limit: i64) -> Result<i64, IecError> {
    let value = text
        .ok_or(IecError::Error)?
        .parse::<i64>()
        .map_err(|_| IecError::Error)?;
    if (0..limit).contains(&value) {
        Ok(value)
    } else {
        Err(IecError::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_units_accumulate() {
        assert_eq!(parse_duration("1S500MS"), Ok(Duration::from_millis(1_500)));
        assert_eq!(parse_duration("1.5H"), Ok(Duration::from_secs(5_400)));
        assert_eq!(parse_duration("-2M"), Ok(Duration::from_secs(-120)));
        assert_eq!(parse_duration("1D_2H"), Ok(Duration::from_secs(93_600)));
        assert_eq!(parse_duration("5X"), Err(IecError::Error));
        assert_eq!(parse_duration(""), Err(IecError::Error));
    }

    #[test]
    fn time_of_day_rejects_out_of_range_fields() {
        assert_eq!(parse_time_of_day("12:30:15.25"), Ok(45_015_250));
        assert_eq!(parse_time_of_day("24:00:00"), Err(IecError::Error));
        assert_eq!(parse_time_of_day("10:60:00"), Err(IecError::Error));
    }
}
