//! Field-level validators.
//!
//! One parser per entry field. Each takes the raw (possibly absent) value and either
//! returns the typed field or the error naming it.

use crate::primitives::{is_number, parse_date, parse_min_length};
use crate::types::{DiagnosisCode, Discharge, EntryType, HealthCheckRating, SickLeave};
use crate::{ValidationError, ValidationResult};
use serde_json::{Map, Value};

pub const MIN_DESCRIPTION_CHARS: usize = 5;
pub const MIN_SPECIALIST_CHARS: usize = 5;
pub const MIN_CRITERIA_CHARS: usize = 5;
pub const MIN_EMPLOYER_CHARS: usize = 2;

// ============================================================================
// Common fields
// ============================================================================

pub fn parse_description(value: Option<&Value>) -> ValidationResult<String> {
    parse_min_length("description", MIN_DESCRIPTION_CHARS, value)
}

pub fn parse_specialist(value: Option<&Value>) -> ValidationResult<String> {
    parse_min_length("specialist", MIN_SPECIALIST_CHARS, value)
}

/// Validate the `type` tag against the closed set of entry kinds.
///
/// # Errors
///
/// Returns [`ValidationError::IncorrectType`] for anything that is not the exact wire name
/// of a known kind.
pub fn parse_entry_type(value: Option<&Value>) -> ValidationResult<EntryType> {
    value
        .and_then(Value::as_str)
        .and_then(EntryType::from_wire)
        .ok_or_else(|| ValidationError::IncorrectType(crate::primitives::describe_value(value)))
}

/// Extract diagnosis codes from the whole candidate object.
///
/// Absence is not an error: a non-object candidate, a missing key, or a `null` value all
/// yield an empty list. A present value must be an array of strings.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidField`] for `diagnosisCodes` if the value is present
/// but is not an array of strings.
pub fn parse_diagnosis_codes(candidate: &Value) -> ValidationResult<Vec<DiagnosisCode>> {
    let value = match candidate.as_object().and_then(|obj| obj.get("diagnosisCodes")) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(value) => value,
    };

    let invalid = || ValidationError::field("diagnosisCodes", Some(value));
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|code| code.as_str().map(str::to_owned).ok_or_else(invalid))
        .collect()
}

// ============================================================================
// Hospital
// ============================================================================

pub fn parse_criteria(value: Option<&Value>) -> ValidationResult<String> {
    parse_min_length("criteria", MIN_CRITERIA_CHARS, value)
}

/// Validate a discharge record.
///
/// Both `date` and `criteria` keys must be present before either is looked at; a missing
/// key in either position gives the same error.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDischarge`] if `value` is not an object holding both
/// keys, or the field error of whichever of the two fails first.
pub fn parse_discharge(value: Option<&Value>) -> ValidationResult<Discharge> {
    let obj = value
        .and_then(Value::as_object)
        .filter(|obj| has_keys(obj, &["date", "criteria"]))
        .ok_or(ValidationError::InvalidDischarge)?;

    Ok(Discharge {
        date: parse_date(obj.get("date"))?,
        criteria: parse_criteria(obj.get("criteria"))?,
    })
}

// ============================================================================
// Occupational healthcare
// ============================================================================

pub fn parse_employer(value: Option<&Value>) -> ValidationResult<String> {
    parse_min_length("employer", MIN_EMPLOYER_CHARS, value)
}

/// Validate a sick leave period.
///
/// `startDate` is required. `endDate` is optional, and an empty string counts as not
/// provided.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidSickLeave`] if `value` is not an object with a
/// `startDate` key, or the date error for a malformed start or end date.
pub fn parse_sick_leave(value: Option<&Value>) -> ValidationResult<SickLeave> {
    let obj = value
        .and_then(Value::as_object)
        .filter(|obj| obj.contains_key("startDate"))
        .ok_or(ValidationError::InvalidSickLeave)?;

    let start_date = parse_date(obj.get("startDate"))?;
    let end_date = match obj.get("endDate") {
        None => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(end) => Some(parse_date(Some(end))?),
    };

    Ok(SickLeave {
        start_date,
        end_date,
    })
}

// ============================================================================
// Health check
// ============================================================================

/// Validate a health check rating.
///
/// The value must be a JSON number equal to one of the defined ordinals. `1.0` is
/// accepted as `1`; `1.5` and `99` are not.
pub fn parse_health_check_rating(value: Option<&Value>) -> ValidationResult<HealthCheckRating> {
    let invalid = || ValidationError::field("health check rating", value);
    if !is_number(value) {
        return Err(invalid());
    }

    value
        .and_then(Value::as_f64)
        .filter(|n| n.fract() == 0.0 && *n >= 0.0)
        .and_then(|n| HealthCheckRating::from_ordinal(n as u64))
        .ok_or_else(invalid)
}

/// Returns `true` if every key in `keys` is present in `obj`, whatever its value.
pub(crate) fn has_keys(obj: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().all(|key| obj.contains_key(*key))
}
