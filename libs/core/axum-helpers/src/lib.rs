//! # Axum Helpers
//!
//! Shared plumbing for the HTTP services in this workspace.
//!
//! - **[`errors`]**: `AppError`, `ErrorCode` and the standard `ErrorResponse` body
//! - **[`extractors`]**: `IdPath` and `ValidatedJson`, rejecting with 422
//! - **[`server`]**: router assembly with Swagger UI, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_router, health_router, serve};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let router = create_router::<ApiDoc>(api_routes).merge(health_router(app_info!()));
//! serve(router, &ServerConfig::default(), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{IdPath, ValidatedJson};
pub use server::{
    HealthCheckFuture, HealthResponse, create_router, health_router, run_health_checks, serve,
    shutdown_signal,
};
