//! Schema Routes

use axum::{extract::State, Json};
use feature_engine::{FEATURE_DIMENSION, FEATURE_NAMES};
use observation::{field_specs, FieldSpec};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Input field with its accepted range
#[derive(Debug, Serialize)]
pub struct FieldSchema {
    #[serde(flatten)]
    pub spec: FieldSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Response for schema endpoint
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub feature_dimension: usize,
    /// Model columns, in order
    pub features: &'static [&'static str],
    pub fields: Vec<FieldSchema>,
}

/// Describe accepted input and the model's column order
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    let limits = state.builder.validator().limits();
    let fields = field_specs()
        .iter()
        .map(|spec| {
            let range = limits.range_for(spec.field);
            FieldSchema {
                spec: spec.clone(),
                min: range.map(|(min, _)| min),
                max: range.map(|(_, max)| max),
            }
        })
        .collect();

    Json(SchemaResponse {
        feature_dimension: FEATURE_DIMENSION,
        features: &FEATURE_NAMES,
        fields,
    })
}
