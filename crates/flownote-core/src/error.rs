//! Error types for FlowNote.

use thiserror::Error;

/// Result type alias using FlowNote's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for FlowNote operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Note rejected before it was saved
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend failed to read or write
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors meaning the requested note does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NoteNotFound(_))
    }

    /// True for failures of the storage layer or the transport to it.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Error::Database(_)
                | Error::Persistence(_)
                | Error::Request(_)
                | Error::Serialization(_)
                | Error::Io(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
