//! Error types for splatlog-core

use thiserror::Error;

/// Result type for splatlog-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for splatlog-core
#[derive(Error, Debug)]
pub enum Error {
    /// No line matched the language's X Power pattern
    #[error("X Power not found in the text")]
    PowerNotFound,

    /// No line starts with a recognized rule name
    #[error("No valid rule found in the text")]
    RuleNotFound,

    /// Classified line counts disagree
    #[error("Mismatch in number of results ({results}), scores ({scores}) and stages ({stages})")]
    CountMismatch {
        results: usize,
        scores: usize,
        stages: usize,
    },

    /// No profile for the language tag
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// A profile pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

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

impl Error {
    /// Whether the error describes the capture itself rather than the environment
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Error::PowerNotFound | Error::RuleNotFound | Error::CountMismatch { .. }
        )
    }
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
