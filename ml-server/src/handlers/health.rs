//! Health check handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    model_trained: bool,
    trained_at: Option<DateTime<Utc>>,
    version: &'static str,
    timestamp: i64,
}

/// Always 200, trained or not
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running",
        model_trained: state.engine.is_trained(),
        trained_at: state.engine.trained_at(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().timestamp(),
    })
}
