//! # Task Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` turns a free-text query into the task record whose description
//! most closely resembles it. It sits on top of the record store (`records`)
//! and is consumed by the CLI, the HTTP server and the instruction layer.
//!
//! Matching is approximate: a windowed Bitap search counts insertions,
//! deletions and substitutions, and penalizes matches that begin far from the
//! expected location. Scores are distances in `[0.0, 1.0]`; `0.0` means the
//! query equals the whole description (ignoring case).
//!
//! ## Core Types
//!
//! - [`MatchConfig`]: threshold, distance, location, highlight and limit knobs.
//! - [`MatchIndex`]: immutable, pre-normalized view of a record set.
//! - [`SearchResult`]: the best hit or an explicit `NoMatch`.
//! - [`SearchHit`]: record position, record, score and highlight spans.
//! - [`Session`]: owns the currently published index and swaps it atomically.
//! - [`MatchMetrics`]: optional observer for per-query latency and outcomes.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{build_index, search, search_top_k, MatchConfig};
//! use records::Record;
//!
//! let records = vec![
//!     Record::new("Tea", "Boil water for tea", "boil; steep", "kettle"),
//!     Record::new("Pasta", "Boil water for pasta", "boil; drain", "pot"),
//!     Record::new("Tidy", "Clean the kitchen", "wipe", "cloth"),
//! ];
//! let index = build_index(records, &MatchConfig::default()).expect("index");
//!
//! let best = search(&index, "boil water tea").into_hit().expect("match");
//! assert_eq!(best.index, 0);
//! assert!(best.score < 0.4);
//!
//! assert!(!search(&index, "xyzxyz").is_match());
//! assert_eq!(search_top_k(&index, "boil water", 5).len(), 2);
//! ```
//!
//! ## Ordering
//!
//! Candidates are sorted by ascending score; equal scores keep record-set
//! order, so among duplicates the earliest record wins. [`search`] and
//! [`search_top_k`] share one candidate path, which makes the head of a top-k
//! list identical to the single best result.
mod bitap;
mod engine;
mod metrics;
mod session;
mod types;

use records::Record;

pub use crate::bitap::MAX_PATTERN_BITS;
pub use crate::engine::MatchIndex;
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::session::Session;
pub use crate::types::{MatchConfig, MatchError, MatchSpan, SearchHit, SearchResult};

/// Build an index over `records`; an empty list is a validation error.
pub fn build_index(records: Vec<Record>, cfg: &MatchConfig) -> Result<MatchIndex, MatchError> {
    MatchIndex::build(records, cfg.clone())
}

/// Best record for `query`. Blank queries and misses yield [`SearchResult::NoMatch`].
pub fn search(index: &MatchIndex, query: &str) -> SearchResult {
    index.search(query)
}

/// Up to `limit` records for `query`, best first. `limit == 0` yields nothing.
pub fn search_top_k(index: &MatchIndex, query: &str, limit: usize) -> Vec<SearchHit> {
    index.search_top_k(query, limit)
}
