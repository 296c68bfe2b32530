//! Entry variants and their field groups.
//!
//! The JSON shape is flat: the `type` tag sits next to the common fields and the
//! variant-specific fields, exactly as callers send it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque reference into the external diagnosis catalog.
pub type DiagnosisCode = String;

// ============================================================================
// Type tag
// ============================================================================

/// The closed set of entry kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Hospital,
    OccupationalHealthcare,
    HealthCheck,
}

impl EntryType {
    /// Every entry kind, in declaration order.
    pub const ALL: [EntryType; 3] = [
        EntryType::Hospital,
        EntryType::OccupationalHealthcare,
        EntryType::HealthCheck,
    ];

    /// Wire name of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Hospital => "Hospital",
            EntryType::OccupationalHealthcare => "OccupationalHealthcare",
            EntryType::HealthCheck => "HealthCheck",
        }
    }

    /// Parse the wire name of a tag. Matching is exact and case-sensitive.
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Keys the variant cannot be built without.
    pub fn required_keys(self) -> &'static [&'static str] {
        match self {
            EntryType::Hospital => &["discharge"],
            EntryType::OccupationalHealthcare => &["employerName"],
            EntryType::HealthCheck => &["healthCheckRating"],
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Field groups
// ============================================================================

/// Fields carried by every entry variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntry {
    pub description: String,
    pub date: String,
    pub specialist: String,
    #[serde(default)]
    pub diagnosis_codes: Vec<DiagnosisCode>,
}

/// Hospital discharge details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discharge {
    pub date: String,
    pub criteria: String,
}

/// Sick leave granted during an occupational healthcare visit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Outcome of a health check, serialised as its ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum HealthCheckRating {
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl HealthCheckRating {
    pub const ALL: [HealthCheckRating; 4] = [
        HealthCheckRating::Healthy,
        HealthCheckRating::LowRisk,
        HealthCheckRating::HighRisk,
        HealthCheckRating::CriticalRisk,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a rating by ordinal; `None` outside the defined set.
    pub fn from_ordinal(ordinal: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|r| u64::from(r.ordinal()) == ordinal)
    }
}

impl Serialize for HealthCheckRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.ordinal())
    }
}

impl<'de> Deserialize<'de> for HealthCheckRating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ordinal = u64::deserialize(deserializer)?;
        HealthCheckRating::from_ordinal(ordinal).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid health check rating: {ordinal}"))
        })
    }
}

// ============================================================================
// Entry
// ============================================================================

/// A validated entry that has not yet been assigned an identifier.
///
/// Each variant carries only its own fields; the type system rules out an entry that
/// mixes fields from two kinds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NewEntry {
    Hospital {
        #[serde(flatten)]
        base: BaseEntry,
        discharge: Discharge,
    },
    OccupationalHealthcare {
        #[serde(flatten)]
        base: BaseEntry,
        #[serde(rename = "employerName")]
        employer_name: String,
        #[serde(
            rename = "sickLeave",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        sick_leave: Option<SickLeave>,
    },
    HealthCheck {
        #[serde(flatten)]
        base: BaseEntry,
        #[serde(rename = "healthCheckRating")]
        health_check_rating: HealthCheckRating,
    },
}

impl NewEntry {
    pub fn entry_type(&self) -> EntryType {
        match self {
            NewEntry::Hospital { .. } => EntryType::Hospital,
            NewEntry::OccupationalHealthcare { .. } => EntryType::OccupationalHealthcare,
            NewEntry::HealthCheck { .. } => EntryType::HealthCheck,
        }
    }

    pub fn base(&self) -> &BaseEntry {
        match self {
            NewEntry::Hospital { base, .. }
            | NewEntry::OccupationalHealthcare { base, .. }
            | NewEntry::HealthCheck { base, .. } => base,
        }
    }
}
