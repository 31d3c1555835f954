//! Convert command

use super::{parse_capture, write_output};
use crate::state::AppState;
use clap::Parser;
use sen::{Args, CliError, CliResult, State};
use splatlog_core::Language;
use std::path::PathBuf;
use tracing::info;

/// Convert one OCR capture into a set document
///
/// Usage:
///   splatlog convert capture.txt
///   splatlog convert capture.txt --output set.json --lang ja
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// OCR text file
    pub input: PathBuf,

    /// Output JSON file (prints to stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Capture language (en, ja)
    #[arg(short, long)]
    pub lang: Option<Language>,
}

#[sen::handler]
pub async fn convert(state: State<AppState>, Args(args): Args<ConvertArgs>) -> CliResult<String> {
    let app = state.read().await;
    let language = app.language(args.lang);

    let session = parse_capture(&args.input, language)?;
    let json = session
        .to_json()
        .map_err(|e| CliError::system(format!("Failed to serialize set: {}", e)))?;

    match args.output {
        Some(path) => {
            write_output(&path, &json)?;
            info!("Wrote set {} to {}", session.set_id, path.display());
            Ok(format!(
                "✓ Parsed {} battles ({}, X Power {})\n  Output: {}",
                session.battles.len(),
                session.rule,
                session.x_power,
                path.display()
            ))
        }
        None => Ok(json),
    }
}
