//! Medical encounter ("entry") parsing for the patient record service.
//!
//! This crate turns an untyped, externally supplied JSON value into one of the three
//! strongly-shaped entry variants, or reports the first constraint it violates.
//!
//! Responsibilities:
//! - Define the entry variants and their field groups
//! - Provide the primitive validators shared by every field (string, date, number)
//! - Classify a candidate by its `type` tag and assemble the matching variant
//!
//! Notes:
//! - Parsing is pure: no I/O, no shared mutable state, no logging
//! - Validation is fail-fast; only the first violation is reported
//! - Identifiers and storage belong to the caller

pub mod fields;
pub mod parse;
pub mod primitives;
pub mod types;

// Re-export facades
pub use parse::{parse_new_entry, EntryParser};

// Re-export public domain-level types
pub use types::{
    BaseEntry, DiagnosisCode, Discharge, EntryType, HealthCheckRating, NewEntry, SickLeave,
};

/// Errors returned when a candidate entry is rejected.
///
/// Every variant is fatal to the parse. The `Display` text is the message handed back to
/// API callers, so it names the offending field and value where there is one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The candidate was not a JSON object.
    #[error("Incorrect or missing data")]
    MissingData,

    /// One or more of the common keys was absent.
    ///
    /// Unlike [`ValidationError::IncompleteEntry`], the message lists the absent keys.
    #[error("Incorrect or missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The `type` tag is not one of the known variants.
    #[error("Incorrect or missing type: {0}")]
    IncorrectType(String),

    /// A single field was present but malformed.
    #[error("Incorrect or missing {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("Incorrect or missing discharge information")]
    InvalidDischarge,

    #[error("Incorrect or missing sick leave information")]
    InvalidSickLeave,

    /// A key required by the selected variant was absent.
    #[error("Incorrect data: some fields are missing")]
    IncompleteEntry,

    /// Raw text handed to [`EntryParser::parse_str`] was not JSON.
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),
}

impl ValidationError {
    /// Build an [`ValidationError::InvalidField`] describing `value`.
    pub(crate) fn field(field: &'static str, value: Option<&serde_json::Value>) -> Self {
        ValidationError::InvalidField {
            field,
            value: primitives::describe_value(value),
        }
    }
}

/// Type alias for Results that can fail with a [`ValidationError`].
pub type ValidationResult<T> = Result<T, ValidationError>;
