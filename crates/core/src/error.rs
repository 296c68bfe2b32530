use entries::ValidationError;
use patientor_uuid::RecordId;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    InvalidEntry(#[from] ValidationError),
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] patientor_uuid::UuidError),
    #[error("patient not found: {0}")]
    PatientNotFound(RecordId),
    #[error("schema mismatch at {path}: {message}")]
    Translation { path: String, message: String },
    #[error("failed to read seed file: {0}")]
    SeedRead(std::io::Error),
    #[error("failed to parse seed file: {0}")]
    SeedParse(serde_json::Error),
    #[error("patient store lock poisoned")]
    StorePoisoned,
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;

impl PatientError {
    /// Build a [`PatientError::Translation`] from a `serde_path_to_error` failure.
    pub(crate) fn from_path_error(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PatientError::Translation {
            path,
            message: err.into_inner().to_string(),
        }
    }
}
