//! Liveness and model status handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::features::LayoutInfo;
use crate::scoring::ModelStatus;
use crate::AppState;

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model_loaded: bool,
    model: ModelStatus,
    layout: LayoutInfo,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Heart Risk Predictor API is running",
    })
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model = state.scorer.status();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model_loaded: model.loaded,
        model,
        layout: LayoutInfo::current(),
    })
}
