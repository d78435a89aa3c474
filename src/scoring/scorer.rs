//! Risk Scorer
//!
//! Runs the injected model on a validated record and turns its raw output
//! into a bounded, rounded score with a motivation tier.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use super::loader::{LoadedModel, ModelInfo};
use super::model::{OutputScale, RawOutput, ScoringModel};
use super::tier::RiskScore;
use crate::features::FeatureRecord;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// Deployment problem: no model was loaded at startup
    #[error("Model not loaded. Place the model artifact at MODEL_PATH and restart.")]
    ModelUnavailable,

    #[error("Model prediction failed: {0}")]
    Prediction(String),
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Score one record with `model`, or fail if no model is available
pub fn score(model: Option<&dyn ScoringModel>, record: &FeatureRecord) -> Result<RiskScore, ScoringError> {
    let model = model.ok_or(ScoringError::ModelUnavailable)?;

    let row = record.to_row();
    let outputs = model
        .predict(&row)
        .map_err(|e| ScoringError::Prediction(e.to_string()))?;

    let raw = outputs
        .into_iter()
        .next()
        .ok_or_else(|| ScoringError::Prediction("model returned an empty prediction".to_string()))?;

    let value = coerce_output(&raw, model.output_scale());

    Ok(RiskScore::new(round2(value.clamp(MIN_SCORE, MAX_SCORE))))
}

/// Convert a raw model output to a 0-100 scale value.
///
/// Outputs that are not numbers (NaN, non-numeric labels) score 0.0.
pub fn coerce_output(raw: &RawOutput, scale: OutputScale) -> f64 {
    let value = match raw {
        RawOutput::Float(v) => Some(*v),
        RawOutput::Integer(i) => Some(*i as f64),
        RawOutput::Label(s) => s.trim().parse::<f64>().ok(),
    };

    match value.filter(|v| !v.is_nan()) {
        Some(v) => v * scale.factor(),
        None => {
            tracing::warn!(?raw, "Model output is not numeric, defaulting score to 0.0");
            0.0
        }
    }
}

/// Round half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// SCORER
// ============================================================================

#[derive(Debug, Default)]
struct InferenceStats {
    count: AtomicU64,
    failures: AtomicU64,
    latency_sum_us: AtomicU64,
}

/// Model status for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub engine: Option<&'static str>,
    pub info: Option<ModelInfo>,
    pub inference_count: u64,
    pub failure_count: u64,
    pub avg_latency_ms: f64,
}

/// Holds the process-wide model and scores requests against it
pub struct RiskScorer {
    model: Option<Arc<dyn ScoringModel>>,
    info: Option<ModelInfo>,
    stats: InferenceStats,
}

impl RiskScorer {
    pub fn new(loaded: Option<LoadedModel>) -> Self {
        match loaded {
            Some(LoadedModel { model, info }) => Self {
                model: Some(model),
                info: Some(info),
                stats: InferenceStats::default(),
            },
            None => Self::unavailable(),
        }
    }

    /// Scorer around an in-memory model with no artifact metadata
    pub fn from_model(model: Arc<dyn ScoringModel>) -> Self {
        Self {
            model: Some(model),
            info: None,
            stats: InferenceStats::default(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            model: None,
            info: None,
            stats: InferenceStats::default(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    pub fn ensure_available(&self) -> Result<(), ScoringError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(ScoringError::ModelUnavailable)
        }
    }

    pub fn score(&self, record: &FeatureRecord) -> Result<RiskScore, ScoringError> {
        let start = Instant::now();
        let result = score(self.model.as_deref(), record);

        if self.model.is_some() {
            let elapsed = start.elapsed().as_micros() as u64;
            self.stats.count.fetch_add(1, Ordering::Relaxed);
            self.stats.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        }

        match &result {
            Ok(risk) => tracing::debug!(score = risk.score, tier = %risk.tier, "Record scored"),
            Err(ScoringError::Prediction(cause)) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(%cause, "Model prediction failed");
            }
            Err(ScoringError::ModelUnavailable) => {
                tracing::error!("Scoring requested but no model is loaded");
            }
        }

        result
    }

    pub fn status(&self) -> ModelStatus {
        let count = self.stats.count.load(Ordering::Relaxed);
        let sum = self.stats.latency_sum_us.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f64 / count as f64) / 1000.0 } else { 0.0 };

        ModelStatus {
            loaded: self.is_available(),
            engine: self.model.as_ref().map(|m| m.engine()),
            info: self.info.clone(),
            inference_count: count,
            failure_count: self.stats.failures.load(Ordering::Relaxed),
            avg_latency_ms: avg,
        }
    }
}

impl std::fmt::Debug for RiskScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskScorer")
            .field("loaded", &self.is_available())
            .field("info", &self.info)
            .finish()
    }
}
