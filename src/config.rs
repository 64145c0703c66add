//! YAML configuration file support for taskmatch.
//!
//! One file carries the settings of every stage so the CLI and the server can
//! share a deployment's tuning.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "kitchen tasks"
//!
//! records:
//!   trim_headers: true
//!   skip_incomplete_rows: true
//!   max_rows: 50000
//!
//! matcher:
//!   threshold: 0.4
//!   distance: 100
//!   location: 0
//!   min_match_char_length: 2
//!   default_limit: 5
//!
//! instruct:
//!   default_provider: groq
//!   duration_provider: groq
//!   timeout_secs: 30
//!   providers:
//!     gemini:
//!       model: gemini-1.5-flash-latest
//! ```
//!
//! Every section is optional; missing sections and fields take their defaults.
use std::fs;
use std::path::Path;

use instruct::InstructConfig;
use matcher::MatchConfig;
use records::RecordsConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TaskMatchConfig {
    /// Configuration format version.
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub records: RecordsConfig,

    #[serde(default)]
    pub matcher: MatchConfig,

    #[serde(default)]
    pub instruct: InstructConfig,
}

impl TaskMatchConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: TaskMatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given, otherwise use defaults.
    pub fn from_optional_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigLoadError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.records
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("records: {e}")))?;
        self.matcher
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("matcher: {e}")))?;
        self.instruct
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("instruct: {e}")))?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Default for TaskMatchConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: None,
            records: RecordsConfig::default(),
            matcher: MatchConfig::default(),
            instruct: InstructConfig::default(),
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}
