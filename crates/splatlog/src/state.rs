//! Application state

use crate::config::Config;
use splatlog_core::Language;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new() -> anyhow::Result<Self> {
        let config = Config::load()?;

        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Language for a command: the flag if given, else the configured default
    pub fn language(&self, flag: Option<Language>) -> Language {
        flag.unwrap_or(self.config.language)
    }
}
