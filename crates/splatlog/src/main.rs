//! splatlog CLI - Splatoon 3 X Battle set records
//!
//! Turns results-screen OCR text into structured set documents and flattens
//! stat.ink battle exports.

mod config;
mod handlers;
mod state;

use handlers::{batch, convert, flatten, languages, show};
use sen::Router;
use state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Initialize application state
    let state = match AppState::new() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to initialize splatlog: {:#}", e);
            std::process::exit(1);
        }
    };

    // Build router
    let router = Router::new()
        // OCR commands
        .route("convert", convert::convert())
        .route("show", show::show())
        .route("batch", batch::batch())

        // stat.ink commands
        .route("flatten", flatten::flatten())

        .route("languages", languages::languages)

        .with_state(state)
        .with_agent_mode(); // JSON output for LLM integration

    // Execute
    let response = router.execute().await;

    // Output
    if response.agent_mode {
        println!("{}", response.to_agent_json());
    } else if !response.output.is_empty() {
        println!("{}", response.output);
    }

    std::process::exit(response.exit_code);
}
