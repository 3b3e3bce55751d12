//! Error types for the domain core

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors
///
/// The first three variants carry the business meaning the transport
/// boundary depends on: `Validation` and `Conflict` map to 400,
/// `NotFound` to 404. Everything else is an unclassified failure (500).
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input; the caller can fix the payload and retry
    #[error("validation failed: {}", .messages.join("; "))]
    Validation {
        /// One message per failed field
        messages: Vec<String>,
    },

    /// Uniqueness violation on operator identity
    #[error("{0}")]
    Conflict(String),

    /// Referenced id does not exist
    #[error("{0}")]
    NotFound(String),

    /// Storage error (RocksDB)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

impl Error {
    /// Validation error with a single message
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            messages: vec![message.into()],
        }
    }
}

impl From<rocksdb::Error> for Error {
    fn from(err: rocksdb::Error) -> Self {
        Error::Storage(err.to_string())
    }
}
