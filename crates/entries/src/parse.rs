//! Entry classification and assembly.
//!
//! The candidate goes through four gates in order, stopping at the first failure:
//!
//! 1. it must be a JSON object
//! 2. it must carry every key in [`COMMON_KEYS`]
//! 3. its `type` must name a known [`EntryType`]
//! 4. each common field must validate
//!
//! The variant is then assembled from the keys its [`EntryType`] requires. When a required
//! variant key is missing the parse ends in [`ValidationError::IncompleteEntry`] rather than a
//! field-specific error.

use crate::fields::{
    has_keys, parse_description, parse_diagnosis_codes, parse_discharge, parse_employer,
    parse_entry_type, parse_health_check_rating, parse_sick_leave, parse_specialist,
};
use crate::primitives::parse_date;
use crate::types::{BaseEntry, EntryType, NewEntry};
use crate::{ValidationError, ValidationResult};
use serde_json::{Map, Value};

/// Keys every candidate must carry, whatever its type.
///
/// `diagnosisCodes` is listed here even though [`parse_diagnosis_codes`] on its own would
/// default a missing key to an empty list.
pub const COMMON_KEYS: [&str; 5] = ["description", "date", "specialist", "type", "diagnosisCodes"];

/// Entry parsing operations.
///
/// This is a zero-sized type used for namespacing entry-related operations.
/// All methods are associated functions.
pub struct EntryParser;

impl EntryParser {
    /// Parse an already-deserialised candidate. See [`parse_new_entry`].
    pub fn parse(candidate: &Value) -> ValidationResult<NewEntry> {
        parse_new_entry(candidate)
    }

    /// Parse a candidate from raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedJson`] if `json_text` is not JSON, otherwise
    /// whatever [`parse_new_entry`] returns.
    pub fn parse_str(json_text: &str) -> ValidationResult<NewEntry> {
        let candidate: Value = serde_json::from_str(json_text)
            .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;
        parse_new_entry(&candidate)
    }
}

/// Validate an untyped candidate and build the matching entry variant.
///
/// The candidate is only read; the returned entry is freshly built and carries no fields
/// other than those of its variant.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first gate or field that fails.
pub fn parse_new_entry(candidate: &Value) -> ValidationResult<NewEntry> {
    let obj = candidate.as_object().ok_or(ValidationError::MissingData)?;

    let missing: Vec<&'static str> = COMMON_KEYS
        .into_iter()
        .filter(|key| !obj.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let entry_type = parse_entry_type(obj.get("type"))?;

    let base = BaseEntry {
        description: parse_description(obj.get("description"))?,
        date: parse_date(obj.get("date"))?,
        specialist: parse_specialist(obj.get("specialist"))?,
        diagnosis_codes: parse_diagnosis_codes(candidate)?,
    };

    assemble(entry_type, base, obj)?.ok_or(ValidationError::IncompleteEntry)
}

/// Build the variant for `entry_type`, or `None` when one of its required keys is absent.
fn assemble(
    entry_type: EntryType,
    base: BaseEntry,
    obj: &Map<String, Value>,
) -> ValidationResult<Option<NewEntry>> {
    if !has_keys(obj, entry_type.required_keys()) {
        return Ok(None);
    }

    let entry = match entry_type {
        EntryType::Hospital => NewEntry::Hospital {
            base,
            discharge: parse_discharge(obj.get("discharge"))?,
        },
        EntryType::OccupationalHealthcare => {
            let employer_name = parse_employer(obj.get("employerName"))?;
            let sick_leave = match obj.get("sickLeave") {
                Some(leave) => Some(parse_sick_leave(Some(leave))?),
                None => None,
            };
            NewEntry::OccupationalHealthcare {
                base,
                employer_name,
                sick_leave,
            }
        }
        EntryType::HealthCheck => NewEntry::HealthCheck {
            base,
            health_check_rating: parse_health_check_rating(obj.get("healthCheckRating"))?,
        },
    };

    Ok(Some(entry))
}
