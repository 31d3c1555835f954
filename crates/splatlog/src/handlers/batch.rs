//! Batch command - convert every OCR capture in a directory

use super::{parse_capture, write_output};
use crate::state::AppState;
use clap::Parser;
use comfy_table::{presets, Table};
use sen::{Args, CliError, CliResult, State};
use sha2::{Digest, Sha256};
use splatlog_core::Language;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Convert all OCR captures (*.txt) under a directory
///
/// Usage:
///   splatlog batch captures/
///   splatlog batch captures/ --output sets/ --lang ja
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Directory to scan
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Output directory (defaults to the configured output_dir, then DIRECTORY)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Capture language (en, ja)
    #[arg(short, long)]
    pub lang: Option<Language>,

    /// Dry run - list captures without converting them
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[sen::handler]
pub async fn batch(state: State<AppState>, Args(args): Args<BatchArgs>) -> CliResult<String> {
    let app = state.read().await;
    let language = app.language(args.lang);
    let directory = &args.directory;

    if !directory.is_dir() {
        return Err(CliError::user(format!(
            "Not a directory: {}",
            directory.display()
        )));
    }

    let output_dir = args
        .output
        .clone()
        .or_else(|| app.config.output_dir.clone())
        .unwrap_or_else(|| directory.clone());

    info!("Scanning directory: {}", directory.display());
    let captures = scan_captures(directory);
    info!("Found {} captures", captures.len());

    if captures.is_empty() {
        return Ok("No captures found.".to_string());
    }

    if args.dry_run {
        let mut output = String::from("Dry run - would convert:\n\n");
        for path in &captures {
            output.push_str(&format!("  • {}\n", path.display()));
        }
        output.push_str(&format!("\nTotal: {} files", captures.len()));
        return Ok(output);
    }

    let report = convert_captures(&captures, directory, &output_dir, language);

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["File", "Status", "Battles", "Detail"]);

    for (name, outcome) in &report.rows {
        let row = match outcome {
            CaptureOutcome::Converted { battles, target } => vec![
                name.clone(),
                "✓".to_string(),
                battles.to_string(),
                target.display().to_string(),
            ],
            CaptureOutcome::Duplicate => vec![
                name.clone(),
                "=".to_string(),
                "-".to_string(),
                "duplicate".to_string(),
            ],
            CaptureOutcome::Failed(reason) => {
                vec![name.clone(), "✗".to_string(), "-".to_string(), reason.clone()]
            }
        };
        table.add_row(row);
    }

    Ok(format!(
        "\n{}\n\nConverted: {}, failed: {}, duplicates: {}",
        table, report.converted, report.failed, report.duplicates
    ))
}

/// What happened to one capture
#[derive(Debug)]
pub(crate) enum CaptureOutcome {
    Converted { battles: usize, target: PathBuf },
    Duplicate,
    Failed(String),
}

/// Per-file outcomes plus totals
#[derive(Debug, Default)]
pub(crate) struct BatchReport {
    pub rows: Vec<(String, CaptureOutcome)>,
    pub converted: usize,
    pub failed: usize,
    pub duplicates: usize,
}

/// Convert every capture; a failing file is recorded and the batch goes on
pub(crate) fn convert_captures(
    captures: &[PathBuf],
    directory: &Path,
    output_dir: &Path,
    language: Language,
) -> BatchReport {
    let mut report = BatchReport::default();
    let mut seen = HashSet::new();

    for path in captures {
        let name = path
            .strip_prefix(directory)
            .unwrap_or(path)
            .display()
            .to_string();

        let outcome = match file_hash(path) {
            Ok(hash) => {
                if seen.insert(hash) {
                    match convert_one(path, directory, output_dir, language) {
                        Ok((battles, target)) => {
                            report.converted += 1;
                            CaptureOutcome::Converted { battles, target }
                        }
                        Err(e) => {
                            warn!("Failed to convert {}: {}", path.display(), e);
                            report.failed += 1;
                            CaptureOutcome::Failed(e.to_string())
                        }
                    }
                } else {
                    info!("Skipping duplicate capture: {}", path.display());
                    report.duplicates += 1;
                    CaptureOutcome::Duplicate
                }
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                report.failed += 1;
                CaptureOutcome::Failed(e.to_string())
            }
        };
        report.rows.push((name, outcome));
    }

    report
}

fn convert_one(
    path: &Path,
    directory: &Path,
    output_dir: &Path,
    language: Language,
) -> Result<(usize, PathBuf), CliError> {
    let session = parse_capture(path, language)?;
    let target = output_path(output_dir, directory, path);
    let json = session
        .to_json()
        .map_err(|e| CliError::system(format!("Failed to serialize set: {}", e)))?;
    write_output(&target, &json)?;
    Ok((session.battles.len(), target))
}

/// Scan directory recursively for OCR text captures, in path order
fn scan_captures(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("txt"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// Mirror the capture's relative location under the output directory
fn output_path(output_dir: &Path, input_dir: &Path, capture: &Path) -> PathBuf {
    let relative = capture.strip_prefix(input_dir).unwrap_or(capture);
    let relative = match relative.file_name() {
        Some(_) => relative.to_path_buf(),
        None => PathBuf::from("capture"),
    };
    output_dir.join(relative).with_extension("json")
}

/// Calculate SHA256 hash of file content
fn file_hash(path: &Path) -> Result<String, CliError> {
    let content =
        std::fs::read(path).map_err(|e| CliError::system(format!("Failed to read file: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(&content);
    let hash = hasher.finalize();

    Ok(format!("{:x}", hash))
}
