//! Storage error types
//!
//! Defines all errors that can occur in the candidate store.

use thiserror::Error;

/// Errors that can occur in the candidate store
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed (creating the data directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite reported an error
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization of a stored column failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored row does not decode into a valid candidate
    #[error("Corrupt record {id}: {reason}")]
    Corruption { id: String, reason: String },

    /// Requested candidate does not exist
    #[error("Candidate not found: {0}")]
    CandidateNotFound(String),

    /// Could not find a free candidate id
    #[error("Could not allocate a unique candidate id after {0} attempts")]
    IdExhausted(usize),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
