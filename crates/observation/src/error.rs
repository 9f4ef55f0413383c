//! Validation Error Types

use thiserror::Error;

/// A single problem with one form field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Field needs a whole number
    #[error("{field} must be a whole number, got {value}")]
    NotInteger { field: &'static str, value: f64 },

    /// NaN or infinity
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// Text that does not parse as a number
    #[error("{field} is not a number: {raw:?}")]
    NotANumber { field: &'static str, raw: String },

    /// Unrecognised yes/no flag
    #[error("{field} must be \"Yes\" or \"No\", got {raw:?}")]
    InvalidFlag { field: &'static str, raw: String },
}

impl ValidationError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::NotInteger { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::InvalidFlag { field, .. } => field,
            ValidationError::MissingField(field) => field,
        }
    }
}

/// A configured range that can never accept a value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LimitsError {
    #[error("{name}: bounds [{min}, {max}] must be finite with min <= max")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    /// Whole-number fields are stored in a byte
    #[error("{name}: bounds [{min}, {max}] must lie within [0, 255]")]
    CountOutOfScale {
        name: &'static str,
        min: f64,
        max: f64,
    },
}

/// Errors turning raw input into a [`crate::WeatherObservation`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObservationError {
    /// One or more fields failed validation
    #[error("Invalid observation: {}", join(.0))]
    InvalidObservation(Vec<ValidationError>),
}

impl ObservationError {
    /// Per-field errors
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            ObservationError::InvalidObservation(errors) => errors,
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_observation_lists_every_field() {
        let err = ObservationError::InvalidObservation(vec![
            ValidationError::MissingField("MinTemp"),
            ValidationError::OutOfRange {
                field: "Humidity9am",
                value: 101.0,
                min: 0.0,
                max: 100.0,
            },
        ]);

        let message = err.to_string();
        assert!(message.contains("MinTemp"));
        assert!(message.contains("Humidity9am value 101 is out of range [0, 100]"));
        assert_eq!(err.errors()[1].field(), "Humidity9am");
    }
}
