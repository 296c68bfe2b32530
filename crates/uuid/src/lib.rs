//! Record identifier utilities.
//!
//! Patients and entries are keyed by a UUID held in one *canonical* text form, so that an
//! identifier read back from a URL, a seed file, or a CLI argument compares equal to the one
//! that was generated.
//!
//! ## Canonical UUID form
//! - Length: 36
//! - Lowercase hexadecimal groups of 8-4-4-4-12 separated by hyphens
//! - Example: `d2773336-f723-11e9-8f0b-362b9e155667`
//!
//! Notes:
//! - This is the same value you would get from `Uuid::new_v4().hyphenated().to_string()`.
//! - Any UUID version is accepted when parsing, since seeded records may predate this service.
//! - Non-canonical values (uppercase, simple, braced, URN) are rejected rather than normalised.

mod record_id;

pub use record_id::{RecordId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
