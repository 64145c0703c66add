//! Error types produced by the records crate.
//!
//! Two layers, kept apart on purpose so callers can tell "the sheet is wrong"
//! from "the sheet could not be read":
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`ValidationError::EmptyRecordSet`] | Validation | No records to build a store from |
//! | [`ValidationError::MissingColumns`] | Validation | Header row lacks required columns |
//! | [`ValidationError::IncompleteRow`] | Validation | Row without `Task`/`Description` (strict mode) |
//! | [`ValidationError::TooManyRows`] | Validation | Row guard from [`RecordsConfig`](crate::RecordsConfig) exceeded |
//! | [`LoadError::Io`] | I/O | File could not be opened or read |
//! | [`LoadError::Csv`] | Syntax | Malformed CSV |
//!
//! # Examples
//!
//! ```rust
//! use records::{parse_csv_str, LoadError, RecordsConfig, ValidationError};
//!
//! let err = parse_csv_str("Task,Description\nt,d\n", &RecordsConfig::default()).unwrap_err();
//! match err {
//!     LoadError::Validation(ValidationError::MissingColumns(missing)) => {
//!         assert_eq!(missing, vec!["Actions".to_string(), "Objects".to_string()]);
//!     }
//!     other => panic!("unexpected error: {other}"),
//! }
//! ```
use thiserror::Error;

/// Validation failures for a record set or the sheet it came from.
///
/// These are fatal to building a store: nothing downstream (index, search)
/// is constructed from a set that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The record list is empty, either as given or after dropping incomplete rows.
    #[error("record set is empty")]
    EmptyRecordSet,

    /// The header row is missing one or more required columns.
    ///
    /// Every missing column is listed, in the order the columns are required.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A data row lacks a non-empty `Task` or `Description` and the
    /// configuration asked for strict rows.
    #[error("row {row} has an empty {field} field")]
    IncompleteRow { row: usize, field: &'static str },

    /// The sheet has more data rows than the configured guard allows.
    #[error("record count exceeds limit of {limit}")]
    TooManyRows { limit: usize },

    /// The loader configuration itself is unusable.
    #[error("invalid records config: {0}")]
    InvalidConfig(String),
}

/// Errors raised while reading a task sheet.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read task sheet: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl LoadError {
    /// Returns the validation failure, if this error is one.
    ///
    /// Presentation layers use this to render "the sheet is wrong" messages
    /// separately from I/O or syntax problems.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            LoadError::Validation(err) => Some(err),
            LoadError::Io(_) | LoadError::Csv(_) => None,
        }
    }
}
