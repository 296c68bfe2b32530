//! Patient and stored-entry models, and new-patient parsing.
//!
//! Responsibilities:
//! - Define the stored patient record and its non-sensitive projection
//! - Define the stored entry (a validated entry plus its identifier)
//! - Parse a new patient from an untyped JSON value against a strict wire schema

use crate::{PatientError, PatientResult};
use entries::NewEntry;
use patientor_uuid::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Public domain-level types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A validated entry that has been assigned an identifier.
///
/// Serialised flat: `id` sits next to the `type` tag and the entry's fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: RecordId,
    #[serde(flatten)]
    pub entry: NewEntry,
}

impl Entry {
    /// Attach a freshly generated identifier to `entry`.
    pub fn assign(entry: NewEntry) -> Self {
        Self {
            id: RecordId::new(),
            entry,
        }
    }
}

/// A stored patient record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: RecordId,
    pub name: String,
    pub date_of_birth: String,
    pub ssn: String,
    pub gender: Gender,
    pub occupation: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// A patient without the social security number or clinical entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonSensitivePatient {
    pub id: RecordId,
    pub name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub occupation: String,
}

impl From<&Patient> for NonSensitivePatient {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name.clone(),
            date_of_birth: patient.date_of_birth.clone(),
            gender: patient.gender,
            occupation: patient.occupation.clone(),
        }
    }
}

/// A validated patient that has not yet been stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub date_of_birth: String,
    pub ssn: String,
    pub gender: Gender,
    pub occupation: String,
}

impl NewPatient {
    /// Parse a new patient from an untyped JSON value.
    ///
    /// This uses `serde_path_to_error` to surface the path of the failing field when the
    /// value does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError`] if:
    /// - the value is not an object with exactly the expected keys
    ///   ([`PatientError::Translation`]),
    /// - `name`, `ssn` or `occupation` is blank, or `dateOfBirth` is not a recognised date
    ///   ([`PatientError::InvalidInput`]).
    pub fn parse(candidate: &Value) -> PatientResult<Self> {
        let wire: NewPatientWire =
            serde_path_to_error::deserialize(candidate).map_err(PatientError::from_path_error)?;

        let date_of_birth = entries::primitives::parse_date(Some(&Value::String(
            wire.date_of_birth.clone(),
        )))
        .map_err(|_| {
            PatientError::InvalidInput(format!(
                "Incorrect or missing dateOfBirth: {}",
                wire.date_of_birth
            ))
        })?;

        Ok(Self {
            name: non_blank("name", wire.name)?,
            date_of_birth,
            ssn: non_blank("ssn", wire.ssn)?,
            gender: wire.gender,
            occupation: non_blank("occupation", wire.occupation)?,
        })
    }

    /// Turn this into a stored patient with a fresh identifier and no entries.
    pub fn into_patient(self) -> Patient {
        Patient {
            id: RecordId::new(),
            name: self.name,
            date_of_birth: self.date_of_birth,
            ssn: self.ssn,
            gender: self.gender,
            occupation: self.occupation,
            entries: Vec::new(),
        }
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct NewPatientWire {
    name: String,
    date_of_birth: String,
    ssn: String,
    gender: Gender,
    occupation: String,
}

fn non_blank(field: &str, value: String) -> PatientResult<String> {
    if value.trim().is_empty() {
        return Err(PatientError::InvalidInput(format!(
            "Incorrect or missing {field}: {value}"
        )));
    }
    Ok(value)
}
