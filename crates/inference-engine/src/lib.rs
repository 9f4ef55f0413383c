//! Rain Prediction Inference
//!
//! Loads the trained model artifact once at startup and runs it on feature
//! vectors. ONNX artifacts run through tract-onnx; JSON artifacts hold a
//! logistic regression.

mod engine;
mod label;
mod logistic;
mod onnx;

pub use engine::{InferenceEngine, InferenceResult, Prediction, Predictor};
pub use label::Label;
pub use logistic::LogisticPredictor;
pub use onnx::OnnxPredictor;

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The artifact could not be loaded; nothing can be predicted
    #[error("Failed to load model artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },
    /// The model failed on a single request
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
}

impl InferenceError {
    pub(crate) fn artifact(path: &str, reason: impl ToString) -> Self {
        InferenceError::ArtifactLoad {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}
