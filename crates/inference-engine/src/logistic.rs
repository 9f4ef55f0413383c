//! Logistic Regression Backend

use crate::engine::{Prediction, Predictor};
use crate::label::Label;
use crate::InferenceError;
use feature_engine::{verify_schema, FeatureVector, FEATURE_DIMENSION};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

fn default_threshold() -> f64 {
    0.5
}

/// On-disk JSON form of the model
#[derive(Debug, Deserialize)]
struct LogisticArtifact {
    /// Column names the weights were fitted against
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    weights: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

/// Binary logistic regression over the feature vector
#[derive(Debug, Clone)]
pub struct LogisticPredictor {
    weights: Vec<f64>,
    intercept: f64,
    threshold: f64,
}

impl LogisticPredictor {
    /// Create a model from fitted coefficients
    pub fn new(weights: Vec<f64>, intercept: f64, threshold: f64) -> Result<Self, InferenceError> {
        if weights.len() != FEATURE_DIMENSION {
            return Err(InferenceError::InvalidInputShape {
                expected: FEATURE_DIMENSION,
                actual: weights.len(),
            });
        }
        Ok(Self {
            weights,
            intercept,
            threshold,
        })
    }

    /// Load a JSON artifact from disk
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let source = path.display().to_string();
        let text =
            std::fs::read_to_string(path).map_err(|e| InferenceError::artifact(&source, e))?;
        Self::from_json(&source, &text)
    }

    /// Parse a JSON artifact; `source` names it in errors
    pub fn from_json(source: &str, text: &str) -> Result<Self, InferenceError> {
        let artifact: LogisticArtifact =
            serde_json::from_str(text).map_err(|e| InferenceError::artifact(source, e))?;

        if let Some(names) = &artifact.feature_names {
            verify_schema(names.as_slice()).map_err(|e| InferenceError::artifact(source, e))?;
        }

        if !(0.0..=1.0).contains(&artifact.threshold) {
            return Err(InferenceError::artifact(
                source,
                format!("threshold {} outside [0, 1]", artifact.threshold),
            ));
        }

        let model = Self::new(artifact.weights, artifact.intercept, artifact.threshold)
            .map_err(|e| InferenceError::artifact(source, e))?;
        info!(
            "Logistic model ready: {} weights, threshold {}",
            model.weights.len(),
            model.threshold
        );
        Ok(model)
    }

    /// Probability of rain for a feature vector
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let z = self.intercept
            + self
                .weights
                .iter()
                .zip(features.as_slice())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        1.0 / (1.0 + (-z).exp())
    }
}

impl Predictor for LogisticPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let probability = self.probability(features);
        if !probability.is_finite() {
            return Err(InferenceError::PredictionFailed(format!(
                "model produced non-finite probability {}",
                probability
            )));
        }
        Ok(Prediction {
            label: Label::from_probability(probability, self.threshold),
            probability: Some(probability),
        })
    }

    fn backend(&self) -> &'static str {
        "logistic"
    }
}
