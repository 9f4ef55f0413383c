//! Prediction Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use inference_engine::Label;
use observation::ObservationInput;
use serde::Serialize;
use std::sync::Arc;

use crate::{ApiError, AppState, PredictionOutcome};

/// One named feature value
#[derive(Debug, Serialize)]
pub struct FeatureValue {
    pub name: &'static str,
    pub value: f64,
}

/// Response for predictions endpoint
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub label: Label,
    pub rain_tomorrow: bool,
    pub headline: &'static str,
    pub detail: &'static str,
    pub advice: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    pub latency_ms: u64,
    pub backend: &'static str,
    /// Model input, in column order
    pub features: Vec<FeatureValue>,
}

impl From<&PredictionOutcome> for PredictionResponse {
    fn from(outcome: &PredictionOutcome) -> Self {
        let label = outcome.result.prediction.label;
        Self {
            label,
            rain_tomorrow: label.is_rain(),
            headline: label.headline(),
            detail: label.detail(),
            advice: label.advice(),
            probability: outcome.result.prediction.probability,
            latency_ms: outcome.result.latency_ms,
            backend: outcome.result.backend,
            features: outcome
                .features
                .named()
                .map(|(name, value)| FeatureValue { name, value })
                .collect(),
        }
    }
}

/// Predict from a JSON observation
pub async fn create_prediction(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ObservationInput>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(input) = body?;
    let outcome = state.predict(&input)?;
    Ok(Json(PredictionResponse::from(&outcome)))
}
