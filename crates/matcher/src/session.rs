//! Per-session index ownership.
//!
//! A [`Session`] holds at most one published [`MatchIndex`]. Loading a new
//! record set builds the replacement completely outside the lock and then
//! swaps the shared reference, so readers either see the old index or the new
//! one, never a partial build. Readers clone the `Arc` and release the lock
//! before scoring.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use records::{Record, RecordSet};

use crate::engine::MatchIndex;
use crate::metrics::MatchMetrics;
use crate::types::{MatchConfig, MatchError, SearchHit, SearchResult};

pub struct Session {
    cfg: MatchConfig,
    current: RwLock<Option<Arc<MatchIndex>>>,
    generation: AtomicU64,
    metrics: Option<Arc<dyn MatchMetrics>>,
}

impl Session {
    pub fn new(cfg: MatchConfig) -> Self {
        Self {
            cfg,
            current: RwLock::new(None),
            generation: AtomicU64::new(0),
            metrics: None,
        }
    }

    /// A session whose indexes report searches to `recorder`.
    pub fn with_metrics(cfg: MatchConfig, recorder: Arc<dyn MatchMetrics>) -> Self {
        Self {
            metrics: Some(recorder),
            ..Self::new(cfg)
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Build an index over `records` and publish it.
    ///
    /// On failure the previously published index stays in place.
    pub fn load(&self, records: Vec<Record>) -> Result<Arc<MatchIndex>, MatchError> {
        let index = MatchIndex::build(records, self.cfg.clone())?;
        Ok(self.publish(index))
    }

    /// Same as [`load`](Self::load) for an already validated record set.
    pub fn load_record_set(&self, records: RecordSet) -> Result<Arc<MatchIndex>, MatchError> {
        let index = MatchIndex::from_record_set(records, self.cfg.clone())?;
        Ok(self.publish(index))
    }

    fn publish(&self, index: MatchIndex) -> Arc<MatchIndex> {
        let index = match &self.metrics {
            Some(recorder) => index.with_metrics(recorder.clone()),
            None => index,
        };
        let index = Arc::new(index);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(index.clone());
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        drop(guard);

        tracing::info!(records = index.len(), generation, "index_published");
        index
    }

    pub fn current(&self) -> Option<Arc<MatchIndex>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of successful loads so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Drop the published index. Later searches fail with [`MatchError::NoRecordSet`].
    pub fn clear(&self) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
    }

    pub fn search(&self, query: &str) -> Result<SearchResult, MatchError> {
        Ok(self.loaded()?.search(query))
    }

    pub fn search_top_k(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, MatchError> {
        Ok(self.loaded()?.search_top_k(query, limit))
    }

    fn loaded(&self) -> Result<Arc<MatchIndex>, MatchError> {
        self.current().ok_or(MatchError::NoRecordSet)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cfg", &self.cfg)
            .field("generation", &self.generation())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}
