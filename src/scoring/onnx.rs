//! ONNX Runtime backend
//!
//! Runs an exported classifier/regressor on a `[1, FEATURE_COUNT]` f32 tensor.
//! Only compiled with the `onnx` cargo feature.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::model::{ModelError, OutputScale, RawOutput, ScoringModel};
use crate::features::{FeatureRow, FEATURE_COUNT};

pub struct OnnxModel {
    // `Session::run` takes `&mut self`
    session: Mutex<Session>,
    output_name: String,
    output_scale: OutputScale,
}

impl OnnxModel {
    pub fn from_file(path: &Path, output_scale: OutputScale) -> Result<Self, ModelError> {
        tracing::info!("Loading ONNX model from: {}", path.display());

        let session = Session::builder()
            .map_err(|e| ModelError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| ModelError(format!("Failed to load model: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelError("No output defined".to_string()))?;

        tracing::info!(output = %output_name, "ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            output_scale,
        })
    }
}

impl ScoringModel for OnnxModel {
    fn predict(&self, row: &FeatureRow) -> Result<Vec<RawOutput>, ModelError> {
        let input: Vec<f32> = row.iter().map(|v| *v as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), input)
            .map_err(|e| ModelError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ModelError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ModelError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| ModelError("No output".to_string()))?;

        // Regressors and probability heads emit f32; classifiers emit i64 labels
        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            return Ok(data.iter().map(|v| RawOutput::Float(*v as f64)).collect());
        }

        let (_, labels) = output
            .try_extract_tensor::<i64>()
            .map_err(|e| ModelError(format!("Extract error: {}", e)))?;

        Ok(labels.iter().map(|v| RawOutput::Integer(*v)).collect())
    }

    fn output_scale(&self) -> OutputScale {
        self.output_scale
    }

    fn engine(&self) -> &'static str {
        "onnx"
    }
}
