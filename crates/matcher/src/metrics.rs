// Metrics hooks for the `matcher` crate.
//
// An index reports each resolved query (latency, candidate count, outcome) to
// its own recorder when one is attached (`MatchIndex::with_metrics`,
// `Session::with_metrics`), otherwise to the global one installed via
// [`set_match_metrics`].
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for query resolution.
pub trait MatchMetrics: Send + Sync {
    /// Record the outcome of one query.
    ///
    /// `query_chars` is the trimmed query length, `candidates` the number of
    /// records that cleared the threshold before any limit was applied, and
    /// `matched` whether at least one record was returned.
    fn record_search(&self, query_chars: usize, latency: Duration, candidates: usize, matched: bool);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
///
/// Typically called once during service startup.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
