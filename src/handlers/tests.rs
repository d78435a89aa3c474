//! Route tests through the full router

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::Config;
use crate::features::tests::sample_payload;
use crate::features::FeatureRow;
use crate::scoring::{ModelError, RawOutput, RiskScorer, ScoringModel};
use crate::{create_router, AppState};

struct FixedModel(Result<f64, &'static str>);

impl ScoringModel for FixedModel {
    fn predict(&self, _row: &FeatureRow) -> Result<Vec<RawOutput>, ModelError> {
        self.0
            .map(|v| vec![RawOutput::Float(v)])
            .map_err(ModelError::new)
    }

    fn engine(&self) -> &'static str {
        "fixed"
    }
}

fn app(scorer: RiskScorer) -> Router {
    create_router(AppState::new(scorer, Config::default()))
}

fn app_returning(value: f64) -> Router {
    app(RiskScorer::from_model(Arc::new(FixedModel(Ok(value)))))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_root() {
    let (status, body) = send(app(RiskScorer::unavailable()), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Heart Risk Predictor API is running");
}

#[tokio::test]
async fn test_health_reports_model_state() {
    let (status, body) = send(app(RiskScorer::unavailable()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["layout"]["feature_count"], 26);

    let (_, body) = send(app_returning(10.0), get("/health")).await;
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["model"]["engine"], "fixed");
}

#[tokio::test]
async fn test_predict_high_risk() {
    let (status, body) = send(app_returning(72.3), post_json(sample_payload().to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], json!(72.3));
    assert_eq!(body["tier"], "high");
    assert_eq!(
        body["message"],
        "Prioritize your heart — consult a doctor and make small daily changes."
    );
}

#[tokio::test]
async fn test_predict_clamps_negative() {
    let (status, body) = send(app_returning(-5.0), post_json(sample_payload().to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], json!(0.0));
    assert_eq!(body["message"], "Great going! Keep up your healthy habits.");
}

#[tokio::test]
async fn test_predict_validation_errors() {
    let mut payload = sample_payload();
    payload.as_object_mut().unwrap().remove("BMI_kg_per_m2");
    payload["stress_level_Low"] = json!(2);

    let (status, body) = send(app_returning(50.0), post_json(payload.to_string())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);

    let detail = body["detail"].as_array().unwrap();
    assert_eq!(detail.len(), 2);
    assert_eq!(detail[0]["kind"], "missing_field");
    assert_eq!(detail[0]["field"], "BMI_kg_per_m2");
    assert_eq!(detail[1]["kind"], "out_of_range");
    assert_eq!(detail[1]["field"], "stress_level_Low");
    assert_eq!(detail[1]["allowed"], "[0,1]");
}

#[tokio::test]
async fn test_predict_without_model() {
    let scorer = RiskScorer::unavailable();

    let (status, body) = send(app(scorer), post_json(json!({ "age": "n/a" }).to_string())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().starts_with("Model not loaded"));
}

#[tokio::test]
async fn test_predict_model_failure() {
    let scorer = RiskScorer::from_model(Arc::new(FixedModel(Err("input has 25 columns, expected 26"))));

    let (status, body) = send(app(scorer), post_json(sample_payload().to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Model prediction failed: input has 25 columns, expected 26"
    );
}

#[tokio::test]
async fn test_predict_malformed_json() {
    let (status, body) = send(app_returning(50.0), post_json("{ not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_predict_oversized_body() {
    let mut payload = sample_payload();
    payload["notes"] = json!("x".repeat(70 * 1024));

    let (status, body) = send(app_returning(50.0), post_json(payload.to_string())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["status"], 413);
}

#[tokio::test]
async fn test_predict_without_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::from(sample_payload().to_string()))
        .unwrap();

    let (status, body) = send(app_returning(50.0), request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["status"], 415);
}

#[tokio::test]
async fn test_predict_non_object_body() {
    let (status, body) = send(app_returning(50.0), post_json("[1, 2, 3]".to_string())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["kind"], "not_an_object");
}

#[test]
fn test_repeated_requests_identical() {
    let app = app_returning(41.237);

    let first = tokio_test::block_on(send(app.clone(), post_json(sample_payload().to_string())));
    let second = tokio_test::block_on(send(app, post_json(sample_payload().to_string())));

    assert_eq!(first, second);
    assert_eq!(first.1["score"], json!(41.24));
}
