//! Languages command

use crate::state::AppState;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use sen::{CliResult, State};
use splatlog_core::{Language, LanguageProfile};

/// List supported capture languages and their rule names
///
/// Usage:
///   splatlog languages
pub async fn languages(state: State<AppState>) -> CliResult<String> {
    let app = state.read().await;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Tag").fg(Color::Cyan),
            Cell::new("Rules").fg(Color::Cyan),
            Cell::new("Default").fg(Color::Cyan),
        ]);

    for language in Language::all() {
        let profile = LanguageProfile::for_language(*language);
        let default = if *language == app.config.language { "✓" } else { "" };
        table.add_row(vec![
            language.to_string(),
            profile.rules.join(", "),
            default.to_string(),
        ]);
    }

    Ok(format!("\n{}", table))
}
