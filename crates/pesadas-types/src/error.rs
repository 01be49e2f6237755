//! Error types for pesadas

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Weighing record errors
///
/// The first three are recovered locally by the view layer. `CorruptPersistedState`
/// never leaves the store: `load` turns it into an empty sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Identifier is empty or a weight is not a number")]
    IncompleteInput,

    #[error("Empty weight {empty} exceeds gross weight {gross}")]
    InvalidWeights { empty: f64, gross: f64 },

    #[error("Record index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("Persisted records are corrupt: {0}")]
    CorruptPersistedState(String),

    #[error("Failed to write records to storage: {0}")]
    StorageWriteFailure(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Record(#[from] RecordError),
}

impl Error {
    /// The record error carried by this error, if any
    pub fn as_record(&self) -> Option<&RecordError> {
        match self {
            Error::Record(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
