//! Feature Vector Assembly

use crate::schema::{Feature, FEATURE_DIMENSION, FEATURE_NAMES};
use crate::FeatureError;
use ndarray::Array2;
use observation::{ObservationError, ObservationInput, Validator, WeatherObservation};
use serde::Serialize;
use tracing::debug;

/// Feature vector for ML inference
///
/// Always exactly [`FEATURE_DIMENSION`] values in [`Feature::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap raw values, rejecting any other length than the schema's
    pub fn from_values(values: Vec<f64>) -> Result<Self, FeatureError> {
        if values.len() != FEATURE_DIMENSION {
            return Err(FeatureError::DimensionMismatch {
                expected: FEATURE_DIMENSION,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of one named column
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    /// Single-sample row matrix of shape `(1, FEATURE_DIMENSION)`
    pub fn to_row(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, FEATURE_DIMENSION), |(_, col)| self.values[col])
    }

    /// Values paired with their column names
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

/// Builds model-ready feature vectors from observations
///
/// Stateless apart from the validator used by [`Self::build_input`].
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorBuilder {
    validator: Validator,
}

impl FeatureVectorBuilder {
    /// Create a builder that validates raw input with the given validator
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Encode an observation. Pure: the same observation always gives the
    /// same vector.
    pub fn build(&self, obs: &WeatherObservation) -> FeatureVector {
        let mut values = vec![0.0; FEATURE_DIMENSION];
        let mut set = |feature: Feature, value: f64| values[feature.index()] = value;

        set(Feature::MinTemp, obs.min_temp());
        set(Feature::MaxTemp, obs.max_temp());
        set(Feature::Rainfall, obs.rainfall());
        set(Feature::WindGustSpeed, obs.wind_gust_speed());
        set(Feature::WindSpeed9am, obs.wind_speed_9am());
        set(Feature::WindSpeed3pm, obs.wind_speed_3pm());
        set(Feature::Humidity9am, f64::from(obs.humidity_9am()));
        set(Feature::Humidity3pm, f64::from(obs.humidity_3pm()));
        set(Feature::Pressure9am, obs.pressure_9am());
        set(Feature::Pressure3pm, obs.pressure_3pm());
        set(Feature::Cloud9am, f64::from(obs.cloud_9am()));
        set(Feature::Cloud3pm, f64::from(obs.cloud_3pm()));
        set(Feature::Temp9am, obs.temp_9am());
        set(Feature::Temp3pm, obs.temp_3pm());
        set(Feature::RainToday, f64::from(obs.rain_today().as_flag()));
        set(Feature::Month, f64::from(obs.month()));

        // Unknown and E leave every direction column at zero
        match Feature::for_direction(obs.wind_gust_dir()) {
            Some(column) => set(column, 1.0),
            None => debug!(
                "No one-hot column for wind gust direction {}",
                obs.wind_gust_dir()
            ),
        }

        FeatureVector { values }
    }

    /// Validate raw input, then encode it
    pub fn build_input(&self, input: &ObservationInput) -> Result<FeatureVector, ObservationError> {
        let obs = self.validator.validate(input)?;
        Ok(self.build(&obs))
    }
}
