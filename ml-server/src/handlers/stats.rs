//! Training stats handler

use axum::{extract::State, Json};

use crate::models::ModelStatsResponse;
use crate::{AppResult, AppState};

/// Held-out metrics of both models. 503 until training finishes.
pub async fn get(State(state): State<AppState>) -> AppResult<Json<ModelStatsResponse>> {
    let stats = state.engine.stats()?;
    Ok(Json(ModelStatsResponse::from(stats)))
}
