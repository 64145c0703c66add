use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Record store status
#[derive(Debug, Serialize)]
pub struct RecordsStatus {
    pub loaded: bool,
    pub records: usize,
    pub generation: u64,
}

/// Replace the task sheet with the CSV request body.
///
/// A rejected sheet leaves the previous one in place.
pub async fn upload_records(
    State(state): State<Arc<ServerState>>,
    body: String,
) -> ServerResult<impl IntoResponse> {
    if body.trim().is_empty() {
        return Err(ServerError::BadRequest("request body must be a CSV task sheet".into()));
    }

    let index = taskmatch::reload_session(&state.session, &body, &state.records_cfg)?;

    Ok(Json(RecordsStatus {
        loaded: true,
        records: index.len(),
        generation: state.session.generation(),
    }))
}

/// Current record count and publish generation
pub async fn records_status(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let current = state.session.current();
    Json(RecordsStatus {
        loaded: current.is_some(),
        records: current.map(|i| i.len()).unwrap_or(0),
        generation: state.session.generation(),
    })
}
