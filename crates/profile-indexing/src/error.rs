//! Error types for search backend calls.

use thiserror::Error;

/// Errors that can occur while applying a record to the index
#[derive(Error, Debug)]
pub enum IndexError {
    /// Transport failure or timeout: the backend never answered
    #[error("Index unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with a non-success status
    #[error("Index rejected update with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Client could not be built from settings
    #[error("Index configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for IndexError {
    fn from(err: reqwest::Error) -> Self {
        IndexError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::Serialization(err.to_string())
    }
}
