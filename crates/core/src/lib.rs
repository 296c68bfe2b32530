//! # Patientor Core
//!
//! Core business logic for the patientor record service.
//!
//! This crate contains pure data operations:
//! - Patient, stored-entry and diagnosis models
//! - New-patient parsing against a strict wire schema
//! - The in-memory patient store and its optional JSON seed file
//!
//! Entry validation itself lives in the `entries` crate; this crate stores what it produces.
//!
//! **No API concerns**: HTTP servers and CLI handling belong in `api-rest` and `patientor-cli`.

pub mod config;
pub mod constants;
pub mod diagnosis;
pub mod error;
pub mod patient;
pub mod seed;
pub mod service;

pub use config::CoreConfig;
pub use diagnosis::Diagnosis;
pub use error::{PatientError, PatientResult};
pub use patient::{Entry, Gender, NewPatient, NonSensitivePatient, Patient};
pub use seed::SeedData;
pub use service::PatientService;

// Re-export the identifier type used across the public API.
pub use patientor_uuid::RecordId;
