//! Heart Risk Predictor server binary

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

use heart_risk_server::config::Config;
use heart_risk_server::scoring::{load_model, RiskScorer};
use heart_risk_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "heart_risk_server=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    config.validate().context("Invalid configuration")?;

    tracing::info!("Heart Risk Predictor starting ({})", config.environment);

    // Load model; the server still starts without one
    let loaded = match load_model(&config.model_path, config.onnx_output_scale) {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            tracing::warn!(
                "Could not load model from {}: {}",
                config.model_path.display(),
                e
            );
            None
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid HOST/PORT")?;

    let state = AppState::new(RiskScorer::new(loaded), config);
    let app = create_router(state);

    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
