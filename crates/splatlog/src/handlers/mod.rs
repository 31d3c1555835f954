//! Command handlers

pub mod batch;
pub mod convert;
pub mod flatten;
pub mod languages;
pub mod show;

use sen::CliError;
use splatlog_core::{Language, SessionDocument, SessionLogParser};
use std::path::Path;

/// Parse one OCR capture, mapping failures onto CLI errors
///
/// Bad captures and unreadable inputs are user errors; anything else is a
/// system error.
pub(crate) fn parse_capture(path: &Path, language: Language) -> Result<SessionDocument, CliError> {
    SessionLogParser::parse_file(path, language.as_str()).map_err(|e| match e {
        splatlog_core::Error::Io(e) => {
            CliError::user(format!("Failed to read {}: {}", path.display(), e))
        }
        e if e.is_parse_failure() => {
            CliError::user(format!("Failed to parse {}: {}", path.display(), e))
        }
        e => CliError::system(format!("Parser error: {}", e)),
    })
}

/// Write a file, creating parent directories as needed
pub(crate) fn write_output(path: &Path, content: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CliError::system(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
    }
    std::fs::write(path, content)
        .map_err(|e| CliError::system(format!("Failed to write {}: {}", path.display(), e)))
}
