//! Configuration for task sheet loading.
//!
//! ```rust
//! use records::RecordsConfig;
//!
//! let config = RecordsConfig::default();
//! assert!(config.trim_headers);
//! assert!(config.skip_incomplete_rows);
//! config.validate().expect("defaults are valid");
//! ```
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Columns every task sheet must carry, in the order they are reported when missing.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Task", "Description", "Actions", "Objects"];

/// Runtime knobs for [`load_csv_reader`](crate::load_csv_reader) and friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Trim surrounding whitespace from header names before matching columns.
    #[serde(default = "default_true")]
    pub trim_headers: bool,

    /// Drop rows whose `Task` or `Description` is empty instead of failing.
    #[serde(default = "default_true")]
    pub skip_incomplete_rows: bool,

    /// Upper bound on data rows; `None` disables the guard.
    #[serde(default)]
    pub max_rows: Option<usize>,

    /// Field delimiter byte.
    #[serde(default = "default_delimiter")]
    pub delimiter: u8,
}

impl RecordsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_rows == Some(0) {
            return Err(ValidationError::InvalidConfig(
                "max_rows must be greater than zero when set".into(),
            ));
        }
        if self.delimiter == b'"' || self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err(ValidationError::InvalidConfig(format!(
                "delimiter {:?} cannot be used",
                self.delimiter as char
            )));
        }
        Ok(())
    }
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            trim_headers: true,
            skip_incomplete_rows: true,
            max_rows: None,
            delimiter: default_delimiter(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_delimiter() -> u8 {
    b','
}
