//! Prediction handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use uuid::Uuid;

use crate::features;
use crate::scoring::RiskScore;
use crate::{AppResult, AppState};

/// Score one patient record
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<RiskScore>> {
    // A missing model is reported whatever the body looks like
    state.scorer.ensure_available()?;

    let Json(raw) = payload?;

    let record = features::validate(&raw).map_err(|errors| {
        tracing::info!("Rejected request: {}", errors);
        errors
    })?;
    tracing::debug!(record = %record.to_log_entry(), "Validated record");

    let risk = state.scorer.score(&record)?;
    tracing::info!(score = risk.score, tier = %risk.tier, "Prediction served");

    Ok(Json(risk))
}
