//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads environment variables.

use crate::constants::DEFAULT_REST_ADDR;
use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    rest_addr: String,
    seed_file: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] if `rest_addr` is blank or `seed_file` is given
    /// but is not a regular file.
    pub fn new(rest_addr: String, seed_file: Option<PathBuf>) -> PatientResult<Self> {
        if rest_addr.trim().is_empty() {
            return Err(PatientError::InvalidInput(
                "rest_addr cannot be empty".into(),
            ));
        }

        if let Some(path) = &seed_file {
            if !path.is_file() {
                return Err(PatientError::InvalidInput(format!(
                    "seed file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            rest_addr,
            seed_file,
        })
    }

    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }

    pub fn seed_file(&self) -> Option<&Path> {
        self.seed_file.as_deref()
    }
}

/// Resolve the REST listen address from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_REST_ADDR`].
pub fn rest_addr_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_REST_ADDR.to_string())
}

/// Resolve the seed file path from an optional string value.
///
/// `None` and empty/whitespace values mean no seed file.
pub fn seed_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
