//! Linear Model - JSON weight artifact
//!
//! Lets the service run without a native inference runtime. The artifact
//! holds an intercept and per-feature weights keyed by field name:
//!
//! ```json
//! {
//!   "name": "heart-risk-logreg",
//!   "version": "2024.1",
//!   "feature_version": 1,
//!   "layout_hash": 123456789,
//!   "link": "logistic",
//!   "output_scale": "probability",
//!   "intercept": -4.2,
//!   "weights": { "age": 0.045, "Systolic_BP_mmHg": 0.012 }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{ModelError, OutputScale, RawOutput, ScoringModel};
use crate::features::layout::{feature_index, validate_layout, LayoutMismatchError};
use crate::features::{FeatureRow, FEATURE_COUNT};

/// Link function applied to the linear predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    #[default]
    Identity,
    Logistic,
}

/// On-disk artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub feature_version: Option<u8>,
    #[serde(default)]
    pub layout_hash: Option<u32>,
    #[serde(default)]
    pub link: Link,
    #[serde(default)]
    pub output_scale: OutputScale,
    #[serde(default)]
    pub intercept: f64,
    pub weights: BTreeMap<String, f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum LinearModelError {
    #[error("unknown feature in weights: {0}")]
    UnknownFeature(String),
    #[error("non-finite weight for {0}")]
    NonFiniteWeight(String),
    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

/// Compiled linear model, weights laid out in column order
#[derive(Debug, Clone)]
pub struct LinearModel {
    name: Option<String>,
    version: Option<String>,
    intercept: f64,
    weights: [f64; FEATURE_COUNT],
    link: Link,
    output_scale: OutputScale,
}

impl LinearModel {
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self, LinearModelError> {
        if let (Some(version), Some(hash)) = (artifact.feature_version, artifact.layout_hash) {
            validate_layout(version, hash)?;
        }

        if !artifact.intercept.is_finite() {
            return Err(LinearModelError::NonFiniteWeight("intercept".to_string()));
        }

        let mut weights = [0.0f64; FEATURE_COUNT];
        for (name, weight) in &artifact.weights {
            let index = feature_index(name)
                .ok_or_else(|| LinearModelError::UnknownFeature(name.clone()))?;
            if !weight.is_finite() {
                return Err(LinearModelError::NonFiniteWeight(name.clone()));
            }
            weights[index] = *weight;
        }

        Ok(Self {
            name: artifact.name,
            version: artifact.version,
            intercept: artifact.intercept,
            weights,
            link: artifact.link,
            output_scale: artifact.output_scale,
        })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, super::loader::LoadError> {
        let artifact: LinearArtifact = serde_json::from_slice(bytes)?;
        Ok(Self::from_artifact(artifact)?)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn linear_predictor(&self, row: &FeatureRow) -> f64 {
        self.intercept
            + self.weights.iter().zip(row.iter()).map(|(w, x)| w * x).sum::<f64>()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl ScoringModel for LinearModel {
    fn predict(&self, row: &FeatureRow) -> Result<Vec<RawOutput>, ModelError> {
        let z = self.linear_predictor(row);
        if !z.is_finite() {
            return Err(ModelError::new(format!("linear predictor overflowed ({})", z)));
        }

        let value = match self.link {
            Link::Identity => z,
            Link::Logistic => sigmoid(z),
        };

        Ok(vec![RawOutput::Float(value)])
    }

    fn output_scale(&self) -> OutputScale {
        self.output_scale
    }

    fn engine(&self) -> &'static str {
        "linear"
    }
}
