//! Model Loader
//!
//! Reads the model artifact once at startup. The engine is picked from the
//! file extension and the artifact's SHA-256 is recorded so operators can
//! tell which model a running instance is serving.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::linear::{LinearModel, LinearModelError};
use super::model::{OutputScale, ScoringModel};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Model not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model artifact JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(#[from] LinearModelError),

    #[error("Model runtime error: {0}")]
    Runtime(String),
}

/// Metadata of the loaded artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub path: String,
    pub engine: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub checksum: String,
    pub size_bytes: u64,
    pub loaded_at: DateTime<Utc>,
}

pub struct LoadedModel {
    pub model: Arc<dyn ScoringModel>,
    pub info: ModelInfo,
}

/// SHA-256 of the artifact bytes, hex encoded
pub fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Load a model artifact from disk.
///
/// `onnx_scale` is the output unit assumed for `.onnx` files, which carry no
/// metadata of their own.
pub fn load_model(path: &Path, onnx_scale: OutputScale) -> Result<LoadedModel, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let (model, name, version): (Arc<dyn ScoringModel>, _, _) = match extension.as_str() {
        "json" => {
            let linear = LinearModel::from_slice(&bytes)?;
            let name = linear.name().map(str::to_string);
            let version = linear.version().map(str::to_string);
            let model: Arc<dyn ScoringModel> = Arc::new(linear);
            (model, name, version)
        }
        "onnx" => (load_onnx(path, onnx_scale)?, None, None),
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let info = ModelInfo {
        path: path.display().to_string(),
        engine: model.engine().to_string(),
        name,
        version,
        checksum: checksum(&bytes),
        size_bytes: bytes.len() as u64,
        loaded_at: Utc::now(),
    };

    tracing::info!(
        path = %info.path,
        engine = %info.engine,
        checksum = %info.checksum,
        "Model loaded"
    );

    Ok(LoadedModel { model, info })
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path, scale: OutputScale) -> Result<Arc<dyn ScoringModel>, LoadError> {
    let model = super::onnx::OnnxModel::from_file(path, scale)
        .map_err(|e| LoadError::Runtime(e.to_string()))?;
    Ok(Arc::new(model))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_path: &Path, _scale: OutputScale) -> Result<Arc<dyn ScoringModel>, LoadError> {
    Err(LoadError::UnsupportedFormat(
        "onnx (rebuild with --features onnx)".to_string(),
    ))
}
