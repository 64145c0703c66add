//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all API endpoints
//! - Middleware stack (request id, logging, compression, CORS, limits)
//! - Startup preload of the task sheet
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, not_found};
use crate::routes::{health, instructions, records, search};
use crate::state::ServerState;
use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use taskmatch::TaskMatchConfig;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Middleware stack (outermost first):
/// 1. Request ID tracking
/// 2. Request logging
/// 3. CORS
/// 4. Compression
/// 5. Timeout handling
/// 6. Body limit (sheet uploads)
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let public_routes = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics));

    let api_routes = Router::new()
        // Records
        .route(
            "/api/v1/records",
            post(records::upload_records).get(records::records_status),
        )
        // Search
        .route("/api/v1/search", get(search::search))
        .route("/api/v1/search/top", get(search::search_top))
        // Instructions
        .route("/api/v1/providers", get(instructions::list_providers))
        .route("/api/v1/instructions", post(instructions::generate_instructions))
        .route("/api/v1/duration", post(instructions::estimate_duration))
        // Metadata
        .route("/api/v1/metadata", get(health::server_metadata));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .with_state(state)
}

/// Build the shared state and, when configured, publish the startup task sheet.
pub fn prepare_state(config: ServerConfig) -> anyhow::Result<Arc<ServerState>> {
    let settings = TaskMatchConfig::from_optional_file(config.config_path.as_deref())
        .context("loading taskmatch configuration")?;
    let records_path = config.records_path.clone();
    let state = Arc::new(ServerState::new(config, settings)?);

    if let Some(path) = records_path {
        let set = taskmatch::load_csv_path(&path, &state.records_cfg)
            .with_context(|| format!("loading task sheet {}", path.display()))?;
        let index = state.session.load_record_set(set)?;
        tracing::info!(path = %path.display(), records = index.len(), "records_preloaded");
    }

    Ok(state)
}

/// Start the taskmatch HTTP server
///
/// Blocks until the server is shut down via SIGTERM or Ctrl+C.
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    let state = prepare_state(config.clone())?;
    let app = build_router(state);
    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!("Starting taskmatch server on {}", addr);
    tracing::info!(
        "Timeout: {}s, Max body: {}MB, CORS: {}",
        config.timeout_secs,
        config.max_body_size_mb,
        config.enable_cors
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
