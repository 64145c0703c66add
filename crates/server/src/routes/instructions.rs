use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use instruct::{parse_steps, InstructionStep, Provider, ProviderInfo};
use records::Record;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which task to generate for: a free-text query or a record position.
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    pub index: Option<usize>,

    /// Overrides the configured default provider
    #[serde(default)]
    pub provider: Option<Provider>,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub default_provider: Provider,
    pub duration_provider: Provider,
    pub providers: Vec<ProviderInfo>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstructionsResponse {
    Generated {
        provider: Provider,
        index: usize,
        record: Record,
        text: String,
        steps: Vec<InstructionStep>,
    },
    NoMatch {
        query: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DurationResponse {
    Estimated {
        provider: Provider,
        index: usize,
        record: Record,
        duration: String,
    },
    NoMatch {
        query: String,
    },
}

enum Target {
    Record(usize, Record),
    Miss(String),
}

/// Resolve the request to a single record.
fn resolve_target(state: &ServerState, request: &TaskRequest) -> ServerResult<Target> {
    let index = state.session.current().ok_or(ServerError::NoRecordSet)?;

    match (&request.query, request.index) {
        (Some(_), Some(_)) => Err(ServerError::BadRequest(
            "provide either query or index, not both".into(),
        )),
        (None, Some(position)) => index
            .records()
            .get(position)
            .cloned()
            .map(|record| Target::Record(position, record))
            .ok_or_else(|| {
                ServerError::BadRequest(format!(
                    "index {position} is out of range for {} records",
                    index.len()
                ))
            }),
        (Some(query), None) => Ok(match index.search(query).into_hit() {
            Some(hit) => Target::Record(hit.index, hit.record),
            None => Target::Miss(query.clone()),
        }),
        (None, None) => Err(ServerError::BadRequest("query or index is required".into())),
    }
}

/// `GET /api/v1/providers`
pub async fn list_providers(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let cfg = state.instruct.config();
    Json(ProvidersResponse {
        default_provider: cfg.default_provider,
        duration_provider: cfg.duration_provider,
        providers: state.instruct.providers(),
    })
}

/// `POST /api/v1/instructions`
pub async fn generate_instructions(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<TaskRequest>,
) -> ServerResult<impl IntoResponse> {
    let (index, record) = match resolve_target(&state, &request)? {
        Target::Record(index, record) => (index, record),
        Target::Miss(query) => return Ok(Json(InstructionsResponse::NoMatch { query })),
    };

    let provider = request
        .provider
        .unwrap_or(state.instruct.config().default_provider);
    let text = state
        .instruct
        .generate_instructions(Some(provider), &record)
        .await?;
    let steps = parse_steps(&text);

    tracing::info!(%provider, index, steps = steps.len(), "instructions_generated");
    Ok(Json(InstructionsResponse::Generated {
        provider,
        index,
        record,
        text,
        steps,
    }))
}

/// `POST /api/v1/duration`
pub async fn estimate_duration(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<TaskRequest>,
) -> ServerResult<impl IntoResponse> {
    let (index, record) = match resolve_target(&state, &request)? {
        Target::Record(index, record) => (index, record),
        Target::Miss(query) => return Ok(Json(DurationResponse::NoMatch { query })),
    };

    let duration = state.instruct.estimate_duration(&record).await?;
    Ok(Json(DurationResponse::Estimated {
        provider: state.instruct.config().duration_provider,
        index,
        record,
        duration,
    }))
}
