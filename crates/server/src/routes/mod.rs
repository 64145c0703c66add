//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: Health checks, readiness, and metrics
//! - `records`: Task sheet upload and status
//! - `search`: Best match and top-k lookups
//! - `instructions`: Provider listing, instruction and duration generation

pub mod health;
pub mod instructions;
pub mod records;
pub mod search;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// # Response
///
/// ```json
/// {
///   "name": "taskmatch server",
///   "version": "0.1.0",
///   "api_version": "v1",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "taskmatch server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/records",
            "/api/v1/search",
            "/api/v1/search/top",
            "/api/v1/providers",
            "/api/v1/instructions",
            "/api/v1/duration",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
