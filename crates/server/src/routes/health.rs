use crate::error::ServerResult;
use crate::state::{ServerMetadata, ServerState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "task-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness check endpoint
///
/// Ready once a task sheet has been published; 503 before that.
pub async fn readiness_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let index = state.session.current();
    let status = if index.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = Json(json!({
        "status": if index.is_some() { "ready" } else { "waiting_for_records" },
        "service": "task-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "components": {
            "api": "ready",
            "records": index.as_ref().map(|i| i.len()).unwrap_or(0),
            "generation": state.session.generation(),
        }
    }));

    (status, body)
}

/// Search counters and uptime
pub async fn metrics(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "uptime_seconds": uptime_seconds(),
        "search": state.stats.snapshot(),
    })))
}

/// Server metadata endpoint
pub async fn server_metadata(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let metadata = ServerMetadata {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime_seconds(),
        records: state.session.current().map(|i| i.len()).unwrap_or(0),
        generation: state.session.generation(),
    };

    Ok(Json(serde_json::to_value(metadata)?))
}
