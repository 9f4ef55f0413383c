//! API Error Responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use observation::ObservationError;
use serde::Serialize;
use thiserror::Error;

/// Shown with every prediction failure
pub const PREDICTION_HINT: &str =
    "Please check your input values and ensure they are within a reasonable range for the model.";

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// The submitted form did not describe a valid observation
    #[error(transparent)]
    InvalidObservation(#[from] ObservationError),

    /// The request body could not be read as an observation
    #[error("{message}")]
    MalformedBody { status: StatusCode, message: String },

    /// The model failed; the form stays usable
    #[error("An error occurred during prediction: {0}")]
    PredictionFailure(#[from] InferenceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidObservation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MalformedBody { status, .. } => *status,
            ApiError::PredictionFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error for a single field
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::InvalidObservation(inner) => ErrorResponse {
                error: "invalid_observation",
                message: err.to_string(),
                fields: inner
                    .errors()
                    .iter()
                    .map(|e| FieldError {
                        field: e.field(),
                        message: e.to_string(),
                    })
                    .collect(),
                hint: None,
            },
            ApiError::MalformedBody { .. } => ErrorResponse {
                error: "malformed_body",
                message: err.to_string(),
                fields: Vec::new(),
                hint: None,
            },
            ApiError::PredictionFailure(_) => ErrorResponse {
                error: "prediction_failure",
                message: err.to_string(),
                fields: Vec::new(),
                hint: Some(PREDICTION_HINT),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use observation::ValidationError;

    #[test]
    fn test_invalid_observation_body() {
        let err = ApiError::from(ObservationError::InvalidObservation(vec![
            ValidationError::MissingField("Month"),
        ]));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = ErrorResponse::from(&err);
        assert_eq!(body.error, "invalid_observation");
        assert_eq!(body.fields.len(), 1);
        assert_eq!(body.fields[0].field, "Month");
        assert!(body.hint.is_none());
    }

    #[test]
    fn test_prediction_failure_body() {
        let err = ApiError::from(InferenceError::PredictionFailed("boom".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = ErrorResponse::from(&err);
        assert_eq!(
            body.message,
            "An error occurred during prediction: Prediction failed: boom"
        );
        assert_eq!(body.hint, Some(PREDICTION_HINT));
    }
}
