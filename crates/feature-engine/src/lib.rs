//! Feature Engineering Engine
//!
//! Turns a validated weather observation into the fixed-order feature vector
//! the rain prediction model was trained on.

mod features;
mod schema;

pub use features::{FeatureVector, FeatureVectorBuilder};
pub use schema::{verify_schema, Feature, FEATURE_DIMENSION, FEATURE_NAMES};

use thiserror::Error;

/// Errors guarding the feature order contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Feature vector must have {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Feature {position}: builder emits {expected:?}, model declares {actual:?}")]
    SchemaMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
}
