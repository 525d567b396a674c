//! Shared axum building blocks for the HTTP services in this workspace.
//!
//! - [`errors`]: `AppError` and the `{"error": ...}` response body
//! - [`extractors`]: `IdPath` integer path parameter
//! - [`http`]: CORS and security header middleware
//! - [`server`]: router assembly, health endpoints, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorResponse};
pub use extractors::IdPath;
pub use http::{cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_PATH, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};
