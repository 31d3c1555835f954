//! Flatten command - project stat.ink battles into flat documents

use crate::state::AppState;
use clap::Parser;
use sen::{Args, CliError, CliResult, State};
use serde_json::Value;
use splatlog_statink::{flatten_battles, retain_xmatch, BattleIndex};
use std::path::PathBuf;
use tracing::info;

/// Flatten a stat.ink battle export into an id-keyed JSON-lines index
///
/// Usage:
///   splatlog flatten battles.json
///   splatlog flatten battles.json --output index.jsonl
#[derive(Parser, Debug)]
pub struct FlattenArgs {
    /// JSON file holding an array of stat.ink battles
    pub input: PathBuf,

    /// JSON-lines index to upsert into (prints to stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep battles from every lobby, not just X Match
    #[arg(long)]
    pub all_lobbies: bool,
}

#[sen::handler]
pub async fn flatten(_state: State<AppState>, Args(args): Args<FlattenArgs>) -> CliResult<String> {
    let content = std::fs::read_to_string(&args.input).map_err(|e| {
        CliError::user(format!("Failed to read {}: {}", args.input.display(), e))
    })?;
    let battles: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
        CliError::user(format!(
            "Expected a JSON array of battles in {}: {}",
            args.input.display(),
            e
        ))
    })?;

    let battles = if args.all_lobbies {
        battles
    } else {
        retain_xmatch(battles)
    };

    if battles.is_empty() {
        return Ok("No battles to index.".to_string());
    }

    let flat = flatten_battles(&battles)
        .map_err(|e| CliError::user(format!("Failed to flatten battles: {}", e)))?;
    info!("Flattened {} battles", flat.len());

    match args.output {
        Some(path) => {
            let mut index = BattleIndex::load(&path)
                .map_err(|e| CliError::system(format!("Failed to load index: {}", e)))?;
            let summary = index.bulk_upsert(flat);
            index
                .save(&path)
                .map_err(|e| CliError::system(format!("Failed to save index: {}", e)))?;

            Ok(format!(
                "✓ Indexed {} battles ({} new, {} updated)\n  Index: {} ({} total)",
                summary.inserted + summary.updated,
                summary.inserted,
                summary.updated,
                path.display(),
                index.len()
            ))
        }
        None => {
            let mut index = BattleIndex::new();
            index.bulk_upsert(flat);

            let mut buffer = Vec::new();
            index
                .write_jsonl(&mut buffer)
                .map_err(|e| CliError::system(format!("Failed to serialize battles: {}", e)))?;
            let jsonl = String::from_utf8(buffer)
                .map_err(|e| CliError::system(format!("Invalid UTF-8 output: {}", e)))?;
            Ok(jsonl.trim_end().to_string())
        }
    }
}
