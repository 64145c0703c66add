//! Workspace umbrella crate for taskmatch.
//!
//! This crate stitches together record ingestion and approximate matching so
//! callers can go from a task sheet to ranked search with a single entry
//! point, and re-exports the instruction layer for surfaces that need it.
//!
//! ```
//! use taskmatch::{build_index_from_str, search, TaskMatchConfig};
//!
//! let sheet = "Task,Description,Actions,Objects\n\
//!              Tea,Boil water for tea,boil,kettle\n\
//!              Tidy,Clean the kitchen,wipe,cloth\n";
//! let index = build_index_from_str(sheet, &TaskMatchConfig::default()).unwrap();
//!
//! let hit = search(&index, "clean kitchen").into_hit().unwrap();
//! assert_eq!(hit.record.task, "Tidy");
//! ```
pub mod config;

pub use crate::config::{ConfigLoadError, TaskMatchConfig};
pub use instruct::{
    parse_steps, InstructConfig, InstructError, InstructionClient, InstructionGenerator,
    InstructionStep, Provider, ProviderClient, ProviderInfo,
};
pub use matcher::{
    build_index, search, search_top_k, set_match_metrics, MatchConfig, MatchError, MatchIndex,
    MatchMetrics, MatchSpan, SearchHit, SearchResult, Session,
};
pub use records::{
    load_csv_path, load_csv_reader, parse_csv_str, LoadError, Record, RecordSet, RecordsConfig,
    ValidationError,
};

use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Errors that can occur while turning a task sheet into a searchable index.
#[derive(Debug)]
pub enum PipelineError {
    Load(LoadError),
    Match(MatchError),
    Config(ConfigLoadError),
}

impl PipelineError {
    /// The validation failure behind this error, if the input itself was rejected.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            PipelineError::Load(err) => err.as_validation(),
            PipelineError::Match(MatchError::Validation(err)) => Some(err),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.validation().is_some()
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Load(err) => write!(f, "record load failure: {err}"),
            PipelineError::Match(err) => write!(f, "index build failure: {err}"),
            PipelineError::Config(err) => write!(f, "configuration failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Load(err) => Some(err),
            PipelineError::Match(err) => Some(err),
            PipelineError::Config(err) => Some(err),
        }
    }
}

impl From<LoadError> for PipelineError {
    fn from(value: LoadError) -> Self {
        PipelineError::Load(value)
    }
}

impl From<MatchError> for PipelineError {
    fn from(value: MatchError) -> Self {
        PipelineError::Match(value)
    }
}

impl From<ConfigLoadError> for PipelineError {
    fn from(value: ConfigLoadError) -> Self {
        PipelineError::Config(value)
    }
}

/// Load a task sheet from disk and index it with the configured matcher.
pub fn build_index_from_csv<P: AsRef<Path>>(
    path: P,
    cfg: &TaskMatchConfig,
) -> Result<MatchIndex, PipelineError> {
    let records = load_csv_path(path, &cfg.records)?;
    Ok(MatchIndex::from_record_set(records, cfg.matcher.clone())?)
}

/// Index a task sheet held in memory.
pub fn build_index_from_str(csv: &str, cfg: &TaskMatchConfig) -> Result<MatchIndex, PipelineError> {
    let records = parse_csv_str(csv, &cfg.records)?;
    Ok(MatchIndex::from_record_set(records, cfg.matcher.clone())?)
}

/// Parse `csv` and publish it as the session's new index.
///
/// A rejected sheet leaves the session's current index untouched.
pub fn reload_session(
    session: &Session,
    csv: &str,
    records_cfg: &RecordsConfig,
) -> Result<Arc<MatchIndex>, PipelineError> {
    let records = parse_csv_str(csv, records_cfg)?;
    Ok(session.load_record_set(records)?)
}
