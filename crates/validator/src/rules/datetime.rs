//! Date rules
//!
//! Values are parsed leniently: RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS`,
//! bare `YYYY-MM-DD` dates, and integer epoch milliseconds all count as
//! dates. Anything else fails the rule.

use crate::rule::Rule;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Parse a value as a timestamp.
pub(crate) fn parse_datetime(value: &Value) -> Option<NaiveDateTime> {
    if let Some(s) = value.as_str() {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_utc());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Some(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return d.and_hms_opt(0, 0, 0);
        }
        return None;
    }
    value
        .as_i64()
        .and_then(|ms| DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc()))
}

/// The value must parse as a date.
#[must_use]
pub fn date() -> Rule {
    Rule::new(
        |value, _| parse_datetime(value).is_some(),
        "Please enter a valid date",
    )
}

/// The value must be a date strictly after `earliest`.
#[must_use]
pub fn date_after(earliest: NaiveDateTime) -> Rule {
    Rule::new(
        move |value, _| parse_datetime(value).is_some_and(|dt| dt > earliest),
        format!("Date must be after {}", earliest.date()),
    )
}

/// The value must be a date strictly before `latest`.
#[must_use]
pub fn date_before(latest: NaiveDateTime) -> Rule {
    Rule::new(
        move |value, _| parse_datetime(value).is_some_and(|dt| dt < latest),
        format!("Date must be before {}", latest.date()),
    )
}
