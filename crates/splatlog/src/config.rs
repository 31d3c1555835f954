//! User configuration
//!
//! Read from `<config_dir>/splatlog/config.yaml` (or `$SPLATLOG_CONFIG`),
//! then overridden by `$SPLATLOG_LANG`. Command-line flags win over both.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use splatlog_core::Language;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_ENV: &str = "SPLATLOG_CONFIG";
const LANG_ENV: &str = "SPLATLOG_LANG";

/// Settings shared by every command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language used when `--lang` is not given
    pub language: Language,
    /// Default output directory for `batch`
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default location and environment
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match Self::path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        if let Ok(tag) = std::env::var(LANG_ENV) {
            config.language = tag
                .parse::<Language>()
                .with_context(|| format!("Invalid {}", LANG_ENV))?;
        }

        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Parse a YAML config file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Config file location, if one can be determined
    pub fn path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("splatlog").join("config.yaml"))
    }
}
