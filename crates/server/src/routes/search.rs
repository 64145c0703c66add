use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use matcher::{SearchHit, SearchResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Upper bound on `limit` for top-k lookups
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct TopParams {
    pub q: String,

    /// Defaults to the matcher's configured limit
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Best-match outcome. A miss is a normal answer, not an error.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResponse {
    Match { query: String, hit: SearchHit },
    NoMatch { query: String },
}

#[derive(Debug, Serialize)]
pub struct TopResponse {
    pub query: String,
    pub limit: usize,
    pub total_matches: usize,
    pub hits: Vec<SearchHit>,
}

/// `GET /api/v1/search?q=`
pub async fn search(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> ServerResult<impl IntoResponse> {
    let response = match state.session.search(&params.q)? {
        SearchResult::Found(hit) => SearchResponse::Match {
            query: params.q,
            hit,
        },
        SearchResult::NoMatch => SearchResponse::NoMatch { query: params.q },
    };
    Ok(Json(response))
}

/// `GET /api/v1/search/top?q=&limit=`
pub async fn search_top(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<TopParams>,
) -> ServerResult<impl IntoResponse> {
    let limit = params
        .limit
        .unwrap_or(state.session.config().default_limit);
    if limit > MAX_LIMIT {
        return Err(ServerError::BadRequest(format!(
            "limit must be at most {MAX_LIMIT}"
        )));
    }

    let hits = state.session.search_top_k(&params.q, limit)?;
    Ok(Json(TopResponse {
        query: params.q,
        limit,
        total_matches: hits.len(),
        hits,
    }))
}
