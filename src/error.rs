//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::features::{ValidationError, ValidationErrors};
use crate::scoring::ScoringError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    BodyRejected(StatusCode, String),
    Validation(ValidationErrors),

    // Model errors
    ModelUnavailable(String),
    Prediction(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, detail) = match self {
            AppError::BodyRejected(status, msg) => (status, msg, None),
            AppError::Validation(errors) => {
                let detail: Vec<ValidationError> = errors.into_errors();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Validation failed".to_string(),
                    Some(detail),
                )
            }
            AppError::ModelUnavailable(msg) => {
                tracing::error!("Model unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg, None)
            }
            AppError::Prediction(msg) => {
                tracing::error!("Prediction error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
        };

        let body = match detail {
            Some(detail) => json!({
                "error": error_message,
                "status": status.as_u16(),
                "detail": detail,
            }),
            None => json!({
                "error": error_message,
                "status": status.as_u16(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::ModelUnavailable => AppError::ModelUnavailable(err.to_string()),
            ScoringError::Prediction(_) => AppError::Prediction(err.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        // 400 bad syntax, 413 over the body limit, 415 wrong content type
        AppError::BodyRejected(rejection.status(), rejection.body_text())
    }
}
