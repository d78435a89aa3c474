//! Configuration module

use std::env;
use std::path::PathBuf;

use validator::Validate;

use crate::scoring::OutputScale;

/// Application configuration
#[derive(Debug, Clone, Validate)]
pub struct Config {
    /// Bind address
    #[validate(length(min = 1))]
    pub host: String,

    /// Server port
    #[validate(range(min = 1))]
    pub port: u16,

    /// Model artifact (.json linear weights or .onnx)
    pub model_path: PathBuf,

    /// Output unit assumed for ONNX models
    pub onnx_output_scale: OutputScale,

    /// Request body limit in bytes
    #[validate(range(min = 1024, max = 10_485_760))]
    pub max_body_bytes: usize,

    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,

    /// Environment (development, production)
    #[validate(length(min = 1))]
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_path: PathBuf::from("models/heart_attack_risk_model.json"),
            onnx_output_scale: OutputScale::Probability,
            max_body_bytes: 64 * 1024,
            log_json: false,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            onnx_output_scale: env::var("ONNX_OUTPUT_SCALE")
                .ok()
                .and_then(|s| parse_output_scale(&s))
                .unwrap_or(defaults.onnx_output_scale),

            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(defaults.max_body_bytes),

            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.log_json),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }
}

fn parse_output_scale(value: &str) -> Option<OutputScale> {
    match value.trim().to_ascii_lowercase().as_str() {
        "percent" => Some(OutputScale::Percent),
        "probability" => Some(OutputScale::Probability),
        _ => None,
    }
}
