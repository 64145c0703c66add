use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use instruct::InstructionClient;
use matcher::{MatchMetrics, Session};
use records::RecordsConfig;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use taskmatch::TaskMatchConfig;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Current task sheet index; replaced wholesale on upload
    pub session: Arc<Session>,

    /// How uploaded sheets are parsed
    pub records_cfg: Arc<RecordsConfig>,

    /// Provider clients for instruction and duration requests
    pub instruct: InstructionClient,

    /// Search counters reported by `/metrics`
    pub stats: Arc<SearchStats>,
}

impl ServerState {
    /// Create new server state from the server config and the taskmatch settings
    pub fn new(config: ServerConfig, settings: TaskMatchConfig) -> ServerResult<Self> {
        let instruct = InstructionClient::new(settings.instruct)
            .map_err(|err| ServerError::Config(err.to_string()))?;

        let stats = Arc::new(SearchStats::default());
        let recorder: Arc<dyn MatchMetrics> = stats.clone();

        Ok(Self {
            config: Arc::new(config),
            session: Arc::new(Session::with_metrics(settings.matcher, recorder)),
            records_cfg: Arc::new(settings.records),
            instruct,
            stats,
        })
    }
}

/// Lock-free search counters fed by the matcher's metrics hook.
#[derive(Debug, Default)]
pub struct SearchStats {
    searches: AtomicU64,
    matched: AtomicU64,
    candidates: AtomicU64,
    latency_micros: AtomicU64,
}

impl SearchStats {
    pub fn snapshot(&self) -> SearchStatsSnapshot {
        let searches = self.searches.load(Ordering::Relaxed);
        let latency = self.latency_micros.load(Ordering::Relaxed);
        SearchStatsSnapshot {
            searches,
            matched: self.matched.load(Ordering::Relaxed),
            candidates: self.candidates.load(Ordering::Relaxed),
            mean_latency_micros: if searches == 0 { 0 } else { latency / searches },
        }
    }
}

impl MatchMetrics for SearchStats {
    fn record_search(&self, _query_chars: usize, latency: Duration, candidates: usize, matched: bool) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        if matched {
            self.matched.fetch_add(1, Ordering::Relaxed);
        }
        self.candidates
            .fetch_add(candidates as u64, Ordering::Relaxed);
        self.latency_micros
            .fetch_add(latency.as_micros() as u64, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchStatsSnapshot {
    pub searches: u64,
    pub matched: u64,
    pub candidates: u64,
    pub mean_latency_micros: u64,
}

/// Server metadata for health checks
#[derive(Debug, Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
    pub records: usize,
    pub generation: u64,
}
