//! ONNX Backend using tract

use crate::engine::{Prediction, Predictor};
use crate::label::Label;
use crate::InferenceError;
use feature_engine::{FeatureVector, FEATURE_DIMENSION};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::info;

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// Threshold applied when the model outputs a rain score
const SCORE_THRESHOLD: f64 = 0.5;

/// Classifier exported to ONNX, input `f32 [1, 31]`
///
/// The first output is read as the label: a string tensor ("Yes"/"No"), an
/// integer class (1 = rain) or a float score.
pub struct OnnxPredictor {
    plan: OnnxPlan,
}

impl OnnxPredictor {
    /// Load and optimize an ONNX model
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let source = path.display().to_string();
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| {
                model.with_input_fact(0, f32::fact([1, FEATURE_DIMENSION]).into())
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::artifact(&source, e))?;

        info!("ONNX model loaded from {}", source);
        Ok(Self { plan })
    }

    fn run(&self, features: &FeatureVector) -> TractResult<TVec<TValue>> {
        let row: Vec<f32> = features.as_slice().iter().map(|&v| v as f32).collect();
        let input = Tensor::from_shape(&[1, FEATURE_DIMENSION], &row)?;
        self.plan.run(tvec!(input.into()))
    }
}

/// Interpret the first model output as a prediction
fn decode(output: &Tensor) -> Result<Prediction, InferenceError> {
    if output.len() == 0 {
        return Err(InferenceError::PredictionFailed(
            "model returned an empty output".to_string(),
        ));
    }

    let datum_type = output.datum_type();
    if datum_type == DatumType::String {
        let labels = output
            .as_slice::<String>()
            .map_err(|e| InferenceError::PredictionFailed(e.to_string()))?;
        let label = Label::parse(&labels[0]).ok_or_else(|| {
            InferenceError::PredictionFailed(format!("unknown class label {:?}", labels[0]))
        })?;
        return Ok(Prediction {
            label,
            probability: None,
        });
    }

    if datum_type.is_integer() {
        let classes = output
            .cast_to::<i64>()
            .map_err(|e| InferenceError::PredictionFailed(e.to_string()))?;
        let class = classes
            .as_slice::<i64>()
            .map_err(|e| InferenceError::PredictionFailed(e.to_string()))?[0];
        let label = Label::from_class(class).ok_or_else(|| {
            InferenceError::PredictionFailed(format!("unknown class index {}", class))
        })?;
        return Ok(Prediction {
            label,
            probability: None,
        });
    }

    if datum_type.is_float() {
        let scores = output
            .cast_to::<f64>()
            .map_err(|e| InferenceError::PredictionFailed(e.to_string()))?;
        let scores = scores
            .as_slice::<f64>()
            .map_err(|e| InferenceError::PredictionFailed(e.to_string()))?;
        // [p(no), p(yes)] or a single p(yes)
        let probability = if scores.len() == 2 { scores[1] } else { scores[0] };
        if !probability.is_finite() {
            return Err(InferenceError::PredictionFailed(format!(
                "model produced non-finite score {}",
                probability
            )));
        }
        return Ok(Prediction {
            label: Label::from_probability(probability, SCORE_THRESHOLD),
            probability: Some(probability),
        });
    }

    Err(InferenceError::PredictionFailed(format!(
        "unsupported output type {:?}",
        datum_type
    )))
}

impl Predictor for OnnxPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let outputs = self
            .run(features)
            .map_err(|e| InferenceError::PredictionFailed(e.to_string()))?;
        let first = outputs.first().ok_or_else(|| {
            InferenceError::PredictionFailed("model produced no outputs".to_string())
        })?;
        decode(first)
    }

    fn backend(&self) -> &'static str {
        "onnx"
    }
}
