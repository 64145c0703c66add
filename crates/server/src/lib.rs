//! taskmatch server - HTTP API over the task lookup pipeline
//!
//! Exposes one shared [`Session`](matcher::Session): a task sheet is uploaded
//! (or preloaded at startup), queries resolve against it, and matched tasks can
//! be turned into step-by-step instructions by an external provider.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check (503 until a sheet is loaded)
//! - `GET /metrics` - Search counters
//! - `POST /api/v1/records` - Replace the task sheet (CSV body)
//! - `GET /api/v1/records` - Record count and publish generation
//! - `GET /api/v1/search?q=` - Best match, or `{"status": "no_match"}`
//! - `GET /api/v1/search/top?q=&limit=` - Ranked matches
//! - `GET /api/v1/providers` - Instruction providers
//! - `POST /api/v1/instructions` - Generate instructions for a task
//! - `POST /api/v1/duration` - Estimate a task's duration
//! - `GET /api/v1/metadata` - Server metadata

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, prepare_state, start_server};
pub use state::{SearchStats, ServerState};
