//! Heart Risk Predictor
//!
//! Scores one patient's vitals, ECG readings and lifestyle indicators with a
//! pre-trained model and returns a 0-100 risk score plus a motivational
//! message.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  HEART RISK PREDICTOR                     │
//! ├──────────────────────────────────────────────────────────┤
//! │   POST /predict (Axum)                                    │
//! │        │                                                  │
//! │        ▼                                                  │
//! │  ┌────────────┐   FeatureRecord   ┌────────────────────┐  │
//! │  │  features  │ ────────────────▶ │  scoring           │  │
//! │  │  validate  │                   │  RiskScorer        │  │
//! │  └────────────┘                   │   └─ ScoringModel  │  │
//! │                                   │      (linear/onnx) │  │
//! │                                   └────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod scoring;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};

use config::Config;
use scoring::RiskScorer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<RiskScorer>,
    pub config: Config,
}

impl AppState {
    pub fn new(scorer: RiskScorer, config: Config) -> Self {
        Self {
            scorer: Arc::new(scorer),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::new())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
