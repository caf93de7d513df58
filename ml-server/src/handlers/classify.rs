//! Classification handlers

use axum::{extract::State, Json};
use smarturl_ml_core::EngineStatus;

use crate::models::{ClassifyRequest, ClassifyResponse, MAX_URL_LENGTH};
use crate::{AppError, AppResult, AppState};

/// Classify one URL. 503 until training finishes.
pub async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> AppResult<Json<ClassifyResponse>> {
    if !state.engine.is_trained() {
        return Err(AppError::NotReady);
    }
    if req.url.trim().is_empty() {
        return Err(AppError::ValidationError("url must not be empty".to_string()));
    }
    if req.url.len() > MAX_URL_LENGTH {
        return Err(AppError::ValidationError(format!(
            "url exceeds {} bytes",
            MAX_URL_LENGTH
        )));
    }

    let verdict = state.engine.predict(&req.url)?;
    tracing::info!(
        url = %verdict.url,
        verdict = %verdict.verdict,
        rf = verdict.forest.confidence,
        nn = verdict.neural.confidence,
        "Classified"
    );

    Ok(Json(ClassifyResponse::from(verdict)))
}

/// Engine lifecycle and feature layout
pub async fn status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.engine.status())
}
