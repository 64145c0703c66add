use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use records::{Record, RecordSet};

use crate::bitap::{normalize, CompiledPattern};
use crate::metrics::{metrics_recorder, MatchMetrics};
use crate::types::{MatchConfig, MatchError, SearchHit, SearchResult};

#[cfg(test)]
mod tests;

/// Descriptions prepared for repeated approximate queries.
///
/// Immutable once built; share it behind an `Arc` and query from any thread.
#[derive(Clone)]
pub struct MatchIndex {
    records: RecordSet,
    normalized: Vec<Vec<char>>,
    cfg: MatchConfig,
    metrics: Option<Arc<dyn MatchMetrics>>,
}

impl fmt::Debug for MatchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchIndex")
            .field("records", &self.records.len())
            .field("cfg", &self.cfg)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl MatchIndex {
    /// Build an index over `records`. Fails on an empty list or invalid config.
    pub fn build(records: Vec<Record>, cfg: MatchConfig) -> Result<Self, MatchError> {
        let set = RecordSet::new(records)?;
        Self::from_record_set(set, cfg)
    }

    /// Build an index over an already validated record set.
    pub fn from_record_set(records: RecordSet, cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        let started = Instant::now();

        let normalized = records
            .iter()
            .map(|record| normalize(&record.description, &cfg))
            .collect();

        tracing::info!(
            records = records.len(),
            elapsed_micros = started.elapsed().as_micros() as u64,
            "index_built"
        );
        Ok(Self {
            records,
            normalized,
            cfg,
            metrics: None,
        })
    }

    /// Report this index's searches to `recorder` instead of the global hook.
    pub fn with_metrics(mut self, recorder: Arc<dyn MatchMetrics>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Best record for `query`, or [`SearchResult::NoMatch`].
    pub fn search(&self, query: &str) -> SearchResult {
        self.resolve(query, 1).into_iter().next().into()
    }

    /// Up to `limit` records for `query`, best first.
    pub fn search_top_k(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        if limit == 0 {
            return Vec::new();
        }
        self.resolve(query, limit)
    }

    /// Like [`search_top_k`](Self::search_top_k) with the configured default limit.
    pub fn search_default(&self, query: &str) -> Vec<SearchHit> {
        self.search_top_k(query, self.cfg.default_limit)
    }

    fn resolve(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("search_skipped_empty_query");
            return Vec::new();
        }

        let started = Instant::now();
        let mut hits = self.candidates(query);
        let candidate_count = hits.len();
        hits.truncate(limit);

        let latency = started.elapsed();
        let best_score = hits.first().map(|hit| hit.score);
        tracing::debug!(
            query_chars = query.chars().count(),
            candidates = candidate_count,
            returned = hits.len(),
            best_score,
            latency_micros = latency.as_micros() as u64,
            "search_resolved"
        );
        if let Some(metrics) = self.metrics.clone().or_else(metrics_recorder) {
            metrics.record_search(
                query.chars().count(),
                latency,
                candidate_count,
                !hits.is_empty(),
            );
        }
        hits
    }

    /// Every record with an accepted match, sorted by score then position.
    ///
    /// For multi-chunk queries the score is the chunk mean, and a record is
    /// kept only when that mean is still within the threshold.
    fn candidates(&self, query: &str) -> Vec<SearchHit> {
        let pattern = CompiledPattern::compile(query, &self.cfg);

        let mut hits: Vec<SearchHit> = self
            .normalized
            .iter()
            .enumerate()
            .filter_map(|(index, text)| {
                let found = pattern.score(text, &self.cfg);
                let accepted = found.is_match && found.score <= self.cfg.threshold;
                accepted.then(|| SearchHit {
                    index,
                    record: self.records[index].clone(),
                    score: found.score,
                    matches: found.spans,
                })
            })
            .collect();

        hits.sort_by(compare_hits);
        hits
    }
}

fn compare_hits(a: &SearchHit, b: &SearchHit) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.index.cmp(&b.index))
}
