//! Error types for splatlog-statink

use thiserror::Error;

/// Result type for splatlog-statink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for splatlog-statink
#[derive(Error, Debug)]
pub enum Error {
    /// A field required for indexing is absent
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Payload has the wrong shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
