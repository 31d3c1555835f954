//! Show command

use super::parse_capture;
use crate::state::AppState;
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use sen::{Args, CliResult, State};
use splatlog_core::{Language, LanguageProfile};
use std::path::PathBuf;

/// Parse an OCR capture and display the set
///
/// Usage:
///   splatlog show capture.txt
///   splatlog show capture.txt --lang ja
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// OCR text file
    pub input: PathBuf,

    /// Capture language (en, ja)
    #[arg(short, long)]
    pub lang: Option<Language>,
}

#[sen::handler]
pub async fn show(state: State<AppState>, Args(args): Args<ShowArgs>) -> CliResult<String> {
    let app = state.read().await;
    let language = app.language(args.lang);
    let profile = LanguageProfile::for_language(language);

    let session = parse_capture(&args.input, language)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(Color::Green),
            Cell::new("Result").fg(Color::Green),
            Cell::new("Score").fg(Color::Green),
            Cell::new("Stage").fg(Color::Green),
        ]);

    for (i, battle) in session.battles.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            battle.result.clone(),
            battle.score.clone(),
            battle.stage.clone(),
        ]);
    }

    let mut output = String::new();
    output.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    output.push_str(&format!("  Set: {}\n", session.set_id));
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    output.push_str(&format!("X Power:     {}\n", session.x_power));
    output.push_str(&format!("Rule:        {}\n", session.rule));
    output.push_str(&format!(
        "Parsed:      {}\n",
        session.datetime.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "Record:      {} wins / {} battles\n\n",
        session.wins(profile.keywords.victory),
        session.battles.len()
    ));

    output.push_str(&table.to_string());
    output.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    Ok(output)
}
