use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use tracing::warn;

/// Lenient numeric extraction applied at the ingestion boundary.
///
/// The source document carries numeric fields either as JSON numbers or as
/// decimal strings, and occasionally as garbage. The policy, preserved from
/// the original system, is to coerce anything unparseable to zero instead
/// of propagating a parse failure. Keeping the coercion in named functions
/// makes the leniency visible and directly testable.

/// Parse an energy-consumption value, coercing malformed input to 0.0.
///
/// Accepts a JSON number or a numeric string. Negative numbers pass
/// through unchanged; non-negativity is a dataset invariant, not a clamp.
pub fn parse_kwh_or_zero(value: &Value) -> f64 {
    parse_f64(value).unwrap_or_else(|| {
        if !value.is_null() {
            warn!("unparseable consumption value {value}, coercing to 0");
        }
        0.0
    })
}

/// Parse an outdoor-temperature value, coercing malformed input to 0.0.
pub fn parse_temp_or_zero(value: &Value) -> f64 {
    parse_f64(value).unwrap_or(0.0)
}

/// Parse a household size, coercing malformed or non-positive input to 1.
///
/// A size of 1 is the safe divisor for per-person averages; zero must
/// never reach a division.
pub fn parse_household_size(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.trunc() as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Extract the hour (0–23) from an `HH:MM` time string.
///
/// Minutes are ignored. Returns `None` for anything that does not start
/// with an in-range integer hour; callers exclude such records from the
/// hourly grouping only.
pub fn parse_hour(time: &str) -> Option<u32> {
    let hour_part = time.split(':').next()?;
    let hour: u32 = hour_part.trim().parse().ok()?;
    if hour < 24 {
        Some(hour)
    } else {
        None
    }
}

/// Map a `YYYY-MM-DD` date string to its `"M/YYYY"` month key.
///
/// The month is 1-based and not zero-padded, matching the chart feed.
pub fn month_key(date: &str) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(format!("{}/{}", parsed.month(), parsed.year()))
}

fn parse_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
