//! Inference Engine Implementation

use crate::label::Label;
use crate::logistic::LogisticPredictor;
use crate::onnx::OnnxPredictor;
use crate::InferenceError;
use feature_engine::{FeatureVector, FEATURE_DIMENSION};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, error, info};

/// Output of a single model call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// Probability of rain, when the model exposes one
    pub probability: Option<f64>,
}

/// A trained model that labels feature vectors
///
/// Implementations are read-only after construction and shared across
/// requests.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError>;

    /// Short name of the backend, for logs and health output
    fn backend(&self) -> &'static str;
}

/// Result of inference operation
#[derive(Debug, Clone, Serialize)]
pub struct InferenceResult {
    /// The prediction
    pub prediction: Prediction,
    /// Inference latency in milliseconds
    pub latency_ms: u64,
    /// Backend that produced it
    pub backend: &'static str,
}

/// Loaded model artifact
pub struct InferenceEngine {
    model_path: String,
    predictor: Box<dyn Predictor>,
}

impl InferenceEngine {
    /// Load an artifact, choosing the backend by file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let source = path.display().to_string();
        info!("Loading model artifact: {}", source);

        let predictor: Box<dyn Predictor> = match path.extension().and_then(|e| e.to_str()) {
            Some("onnx") => Box::new(OnnxPredictor::load(path)?),
            Some("json") => Box::new(LogisticPredictor::load(path)?),
            other => {
                let err = InferenceError::artifact(
                    &source,
                    format!("unsupported artifact format {:?}, expected .onnx or .json", other),
                );
                error!("{}", err);
                return Err(err);
            }
        };

        info!("Model loaded successfully ({} backend)", predictor.backend());
        Ok(Self {
            model_path: source,
            predictor,
        })
    }

    /// Wrap an already constructed predictor
    pub fn with_predictor(model_path: &str, predictor: Box<dyn Predictor>) -> Self {
        Self {
            model_path: model_path.to_string(),
            predictor,
        }
    }

    /// Run inference on a feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        if features.len() != FEATURE_DIMENSION {
            return Err(InferenceError::InvalidInputShape {
                expected: FEATURE_DIMENSION,
                actual: features.len(),
            });
        }

        let start = std::time::Instant::now();
        let prediction = self.predictor.predict(features)?;
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Prediction: {} (p={:?}, latency={}ms)",
            prediction.label, prediction.probability, latency_ms
        );

        Ok(InferenceResult {
            prediction,
            latency_ms,
            backend: self.predictor.backend(),
        })
    }

    /// Get model path
    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    pub fn backend(&self) -> &'static str {
        self.predictor.backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{Feature, FeatureVectorBuilder};
    use observation::ObservationInput;
    use std::io::Write;

    struct Failing;

    impl Predictor for Failing {
        fn predict(&self, _features: &FeatureVector) -> Result<Prediction, InferenceError> {
            Err(InferenceError::PredictionFailed("model exploded".to_string()))
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    fn humid_model() -> LogisticPredictor {
        let mut weights = vec![0.0; FEATURE_DIMENSION];
        weights[Feature::Humidity3pm.index()] = 0.2;
        LogisticPredictor::new(weights, -10.0, 0.5).unwrap()
    }

    fn features(humidity_3pm: f64) -> FeatureVector {
        FeatureVectorBuilder::default()
            .build_input(&ObservationInput {
                humidity_3pm: Some(humidity_3pm),
                ..ObservationInput::form_defaults()
            })
            .unwrap()
    }

    #[test]
    fn test_predict_with_logistic_backend() {
        let engine = InferenceEngine::with_predictor("memory", Box::new(humid_model()));
        assert_eq!(engine.backend(), "logistic");

        let dry = engine.predict(&features(22.0)).unwrap();
        assert_eq!(dry.prediction.label, Label::No);

        let wet = engine.predict(&features(90.0)).unwrap();
        assert_eq!(wet.prediction.label, Label::Yes);
        assert!(wet.prediction.probability.unwrap() > 0.5);
    }

    #[test]
    fn test_prediction_failure_surfaces() {
        let engine = InferenceEngine::with_predictor("memory", Box::new(Failing));
        let err = engine.predict(&features(50.0)).unwrap_err();
        assert!(matches!(err, InferenceError::PredictionFailed(_)));
    }

    #[test]
    fn test_load_json_artifact() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let artifact = serde_json::json!({
            "feature_names": feature_engine::FEATURE_NAMES,
            "weights": vec![0.0; FEATURE_DIMENSION],
            "intercept": 1.0,
        });
        write!(file, "{}", artifact).unwrap();

        let engine = InferenceEngine::load(file.path()).unwrap();
        assert_eq!(engine.backend(), "logistic");
        assert_eq!(engine.model_path(), file.path().display().to_string());
        let result = engine.predict(&features(50.0)).unwrap();
        assert_eq!(result.prediction.label, Label::Yes);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".pkl").tempfile().unwrap();
        let err = InferenceEngine::load(file.path()).err().unwrap();
        assert!(matches!(err, InferenceError::ArtifactLoad { .. }));
        assert!(err.to_string().contains("unsupported artifact format"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = InferenceEngine::load("/nonexistent/rain_model.json").err().unwrap();
        assert!(matches!(err, InferenceError::ArtifactLoad { .. }));
    }
}
