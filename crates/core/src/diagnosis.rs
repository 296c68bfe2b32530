//! Diagnosis catalog model.

use serde::{Deserialize, Serialize};

/// One entry of the diagnosis catalog.
///
/// Entries reference diagnoses by `code` only; nothing checks that a referenced code exists
/// in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}
