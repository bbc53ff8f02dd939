//! errlens configuration: credential from the environment, the rest from
//! an optional TOML file.

use std::path::{Path, PathBuf};

use el_analysis::OpenAiConfig;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "errlens.toml";

/// Configuration failures. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found in environment variables")]
    MissingCredential(&'static str),

    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid config: {0}")]
    Parse(String),
}

/// Top-level configuration for a run.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Log file to analyze.
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
    /// Report destination, overwritten on every run.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Emit pipeline progress as debug events.
    #[serde(default = "default_debug")]
    pub debug: bool,
    /// Chat completions settings.
    #[serde(default)]
    pub openai: OpenAiConfig,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("error.log")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("log_analysis_report.txt")
}

fn default_debug() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            debug: default_debug(),
            openai: OpenAiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

/// Read the API credential from the process environment.
pub fn resolve_credential() -> Result<String, ConfigError> {
    resolve_credential_with(|name| std::env::var(name).ok())
}

/// Resolve the API credential through `lookup`. Empty values count as missing.
pub fn resolve_credential_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    lookup(API_KEY_VAR)
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingCredential(API_KEY_VAR))
}
