//! CLI configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::{bail, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Path to the JSON state file.
    pub state_path: PathBuf,
    /// Log level filter string (e.g. "info", "rewards_ledger=debug").
    pub log_level: String,
    /// Log output format: "text" or "json".
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let state_path = lookup("REWARDS_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.state_path);

        let log_level = lookup("REWARDS_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = lookup("REWARDS_LOG_FORMAT").unwrap_or(defaults.log_format);
        if log_format != "text" && log_format != "json" {
            bail!("REWARDS_LOG_FORMAT must be \"text\" or \"json\", got {log_format:?}");
        }

        Ok(Config { state_path, log_level, log_format })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        state: Option<PathBuf>,
        log_level: Option<String>,
        log_format: Option<String>,
    ) -> Self {
        if let Some(path) = state {
            self.state_path = path;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = log_format {
            self.log_format = format;
        }
        self
    }
}

fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trader-rewards")
        .join("state.json")
}
