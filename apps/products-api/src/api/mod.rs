//! API routes module

pub mod health;
pub mod products;

use axum::{middleware, routing::get, Router};
use axum_helpers::{create_router, health_router};
use observability::{metrics_handler, metrics_middleware};
use tower_http::cors::CorsLayer;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes (nested under `/api` by [`build_app`])
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Full application router: API, OpenAPI document, health, readiness and
/// metrics, with request metrics recorded for every route.
pub fn build_app(state: &AppState, cors: CorsLayer) -> Router {
    create_router::<ApiDoc>(routes(state), cors)
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware))
}
