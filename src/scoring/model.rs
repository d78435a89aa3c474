//! Scoring Model - capability interface for the pre-trained risk model
//!
//! The scorer only ever sees a `dyn ScoringModel`. How the model is
//! serialized or executed (JSON linear weights, ONNX Runtime, a test stub)
//! stays behind this trait.

use serde::{Deserialize, Serialize};

use crate::features::FeatureRow;

/// One element of the model's prediction output
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutput {
    /// Regression value or probability
    Float(f64),
    /// Class index
    Integer(i64),
    /// String label (some exported classifiers emit these)
    Label(String),
}

/// Unit the model's numeric output is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputScale {
    /// Already a 0-100 risk score
    #[default]
    Percent,
    /// 0-1 probability, multiplied by 100
    Probability,
}

impl OutputScale {
    pub fn factor(&self) -> f64 {
        match self {
            OutputScale::Percent => 1.0,
            OutputScale::Probability => 100.0,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

impl ModelError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Shared, read-only risk model
///
/// Implementations must be safe to call from many requests at once.
pub trait ScoringModel: Send + Sync {
    /// Run the model on a single row in `FEATURE_LAYOUT` order
    fn predict(&self, row: &FeatureRow) -> Result<Vec<RawOutput>, ModelError>;

    fn output_scale(&self) -> OutputScale {
        OutputScale::Percent
    }

    /// Short engine name for status reporting
    fn engine(&self) -> &'static str;
}
