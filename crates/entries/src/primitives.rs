//! Primitive validators shared by every entry field.
//!
//! Each check is total over any JSON value (including an absent one) and never
//! normalises its input: accepted strings are returned exactly as supplied.

use crate::{ValidationError, ValidationResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Date-only layout.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Local date-time layouts: minutes, seconds, or fractional seconds.
const LOCAL_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// The local layouts followed by a `±HH:MM` offset.
const OFFSET_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M%:z",
];

/// Returns `true` if `value` is present and textual.
pub fn is_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(_)))
}

/// Returns `true` if `value` is present and numeric.
pub fn is_number(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Number(_)))
}

/// Returns `true` if `text` names a real calendar date.
///
/// Recognised layouts:
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DDTHH:MM:SS.sss`, each optionally
///   followed by `Z` or a `±HH:MM` offset
/// - RFC 3339 (`2024-01-01 10:00:00+01:00`)
/// - RFC 2822 (`Mon, 01 Jan 2024 10:00:00 +0000`)
///
/// Out-of-range components (`2024-02-30`, `2024-13-01`, `2024-01-01T25:00`) are rejected.
pub fn is_date(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    is_partial_date(text)
        || NaiveDate::parse_from_str(text, DATE_FORMAT).is_ok()
        || is_local_date_time(text.strip_suffix('Z').unwrap_or(text))
        || OFFSET_DATE_TIME_FORMATS
            .iter()
            .any(|fmt| DateTime::parse_from_str(text, fmt).is_ok())
        || DateTime::parse_from_rfc3339(text).is_ok()
        || DateTime::parse_from_rfc2822(text).is_ok()
}

/// `YYYY` or `YYYY-MM`, checked by completing it to the first day of the period.
fn is_partial_date(text: &str) -> bool {
    let completed = match text.len() {
        4 => format!("{text}-01-01"),
        7 => format!("{text}-01"),
        _ => return false,
    };
    text.bytes().take(4).all(|b| b.is_ascii_digit())
        && NaiveDate::parse_from_str(&completed, DATE_FORMAT).is_ok()
}

fn is_local_date_time(text: &str) -> bool {
    LOCAL_DATE_TIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(text, fmt).is_ok())
}

/// Validate a date field, returning the input string unchanged.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidField`] for `date` if `value` is absent, not a string,
/// or not a recognised date.
pub fn parse_date(value: Option<&Value>) -> ValidationResult<String> {
    let invalid = || ValidationError::field("date", value);
    if !is_string(value) {
        return Err(invalid());
    }

    value
        .and_then(Value::as_str)
        .filter(|text| is_date(text))
        .map(str::to_owned)
        .ok_or_else(invalid)
}

/// Number of UTF-16 code units in `text`, the length browsers and JavaScript clients see.
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Validate a string field that must be at least `min_length` long.
///
/// Length is measured by [`text_length`], so a character outside the Basic Multilingual
/// Plane counts twice. No trimming is applied, so `"     "` satisfies a minimum of five.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidField`] naming `field` if `value` is absent, not a
/// string, or too short.
pub fn parse_min_length(
    field: &'static str,
    min_length: usize,
    value: Option<&Value>,
) -> ValidationResult<String> {
    let invalid = || ValidationError::field(field, value);
    if !is_string(value) {
        return Err(invalid());
    }

    value
        .and_then(Value::as_str)
        .filter(|text| text_length(text) >= min_length)
        .map(str::to_owned)
        .ok_or_else(invalid)
}

/// Render a candidate value for an error message.
///
/// Strings are shown raw, other values as compact JSON, and an absent value as `undefined`.
pub fn describe_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
