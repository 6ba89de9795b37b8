//! Optional TOML configuration for the report tool.
//!
//! Every field has a default, so running without a config file behaves like
//! the stock chess.com setup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportConfig {
    /// Player endpoint prefix; usernames are appended to it.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Connect and response timeout for each request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory the report file is written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_api_base() -> String {
    "https://api.chess.com/pub/player".to_string()
}

fn default_user_agent() -> String {
    concat!("chess-report/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            output_dir: default_output_dir(),
        }
    }
}

impl ReportConfig {
    /// Loads `chess-report.toml` from the working directory, falling back to
    /// defaults when it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads an explicitly named config file; a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from("chess-report.toml")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `api_base` without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}
