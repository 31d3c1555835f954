//! # splatlog-core
//!
//! Turns OCR text captured from Splatoon 3 results screens into a structured
//! record of one X Battle set.
//!
//! ## Features
//!
//! - Per-language profiles (rule names, X Power pattern, result keywords)
//! - First-match-wins line classification into results, scores and stages
//! - Count validation so partial captures never produce a document
//! - Chronological battle ordering (oldest first)
//!
//! ## Example
//!
//! ```no_run
//! use splatlog_core::SessionLogParser;
//!
//! fn main() -> splatlog_core::Result<()> {
//!     let session = SessionLogParser::parse_file("capture.txt", "en")?;
//!     println!("{} battles at {} XP", session.battles.len(), session.x_power);
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod error;
pub mod language;
pub mod parser;
pub mod types;

// Re-exports for convenience
pub use classify::{ClassifiedLine, LineClassifier, LineKind};
pub use error::{Error, Result};
pub use language::{Keywords, LanguageProfile};
pub use parser::{assemble, normalize_lines, Classified, LogParser, SessionLogParser};
pub use types::{Language, MatchRecord, SessionDocument};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
