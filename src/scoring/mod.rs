//! Scoring Module - model capability, loading and the risk scorer
//!
//! The model is loaded once at startup and injected into [`RiskScorer`].
//! Everything here is synchronous and lock-free on the request path
//! (the ONNX backend serializes calls into its own session).

pub mod loader;
pub mod linear;
pub mod model;
pub mod scorer;
pub mod tier;

#[cfg(feature = "onnx")]
pub mod onnx;


pub use loader::{load_model, LoadError, LoadedModel, ModelInfo};
pub use model::{ModelError, OutputScale, RawOutput, ScoringModel};
pub use scorer::{score, ModelStatus, RiskScorer, ScoringError};
pub use tier::{MotivationTier, RiskScore};
