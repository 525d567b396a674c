//! Readiness endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::postgres::check_health;
use serde_json::Value;

use crate::state::AppState;

/// 200 when the database answers, 503 otherwise.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db = state.db.clone();
    let db_check: HealthCheckFuture =
        Box::pin(async move { check_health(&db).await.map_err(|e| e.to_string()) });

    run_health_checks(vec![("database", db_check)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
