//! Feature Schema
//!
//! The order of the model's input columns. Changing anything here silently
//! changes what the model sees; the tests pin every position.

use crate::FeatureError;
use observation::WindDirection;
use serde::Serialize;

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 31;

/// Column names, in model order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "MinTemp",
    "MaxTemp",
    "Rainfall",
    "WindGustSpeed",
    "WindSpeed9am",
    "WindSpeed3pm",
    "Humidity9am",
    "Humidity3pm",
    "Pressure9am",
    "Pressure3pm",
    "Cloud9am",
    "Cloud3pm",
    "Temp9am",
    "Temp3pm",
    "RainToday",
    "Month",
    "WindGustDir_ENE",
    "WindGustDir_ESE",
    "WindGustDir_N",
    "WindGustDir_NE",
    "WindGustDir_NNE",
    "WindGustDir_NNW",
    "WindGustDir_NW",
    "WindGustDir_S",
    "WindGustDir_SE",
    "WindGustDir_SSE",
    "WindGustDir_SSW",
    "WindGustDir_SW",
    "WindGustDir_W",
    "WindGustDir_WNW",
    "WindGustDir_WSW",
];

/// One column of the feature vector
///
/// Discriminants are the column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Feature {
    MinTemp = 0,
    MaxTemp,
    Rainfall,
    WindGustSpeed,
    WindSpeed9am,
    WindSpeed3pm,
    Humidity9am,
    Humidity3pm,
    Pressure9am,
    Pressure3pm,
    Cloud9am,
    Cloud3pm,
    Temp9am,
    Temp3pm,
    RainToday,
    Month,
    WindGustDirEne,
    WindGustDirEse,
    WindGustDirN,
    WindGustDirNe,
    WindGustDirNne,
    WindGustDirNnw,
    WindGustDirNw,
    WindGustDirS,
    WindGustDirSe,
    WindGustDirSse,
    WindGustDirSsw,
    WindGustDirSw,
    WindGustDirW,
    WindGustDirWnw,
    WindGustDirWsw,
}

impl Feature {
    /// Every column, in model order
    pub const ALL: [Feature; FEATURE_DIMENSION] = [
        Feature::MinTemp,
        Feature::MaxTemp,
        Feature::Rainfall,
        Feature::WindGustSpeed,
        Feature::WindSpeed9am,
        Feature::WindSpeed3pm,
        Feature::Humidity9am,
        Feature::Humidity3pm,
        Feature::Pressure9am,
        Feature::Pressure3pm,
        Feature::Cloud9am,
        Feature::Cloud3pm,
        Feature::Temp9am,
        Feature::Temp3pm,
        Feature::RainToday,
        Feature::Month,
        Feature::WindGustDirEne,
        Feature::WindGustDirEse,
        Feature::WindGustDirN,
        Feature::WindGustDirNe,
        Feature::WindGustDirNne,
        Feature::WindGustDirNnw,
        Feature::WindGustDirNw,
        Feature::WindGustDirS,
        Feature::WindGustDirSe,
        Feature::WindGustDirSse,
        Feature::WindGustDirSsw,
        Feature::WindGustDirSw,
        Feature::WindGustDirW,
        Feature::WindGustDirWnw,
        Feature::WindGustDirWsw,
    ];

    /// The one-hot wind gust direction columns
    ///
    /// `E` has no column: it is the reference category and encodes as all zeros.
    pub const WIND_GUST_DIRECTIONS: [Feature; 15] = [
        Feature::WindGustDirEne,
        Feature::WindGustDirEse,
        Feature::WindGustDirN,
        Feature::WindGustDirNe,
        Feature::WindGustDirNne,
        Feature::WindGustDirNnw,
        Feature::WindGustDirNw,
        Feature::WindGustDirS,
        Feature::WindGustDirSe,
        Feature::WindGustDirSse,
        Feature::WindGustDirSsw,
        Feature::WindGustDirSw,
        Feature::WindGustDirW,
        Feature::WindGustDirWnw,
        Feature::WindGustDirWsw,
    ];

    /// Column position
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name the model was trained with
    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    /// Column that flags a wind gust direction, if it has one
    pub fn for_direction(direction: WindDirection) -> Option<Feature> {
        let feature = match direction {
            WindDirection::EastNorthEast => Feature::WindGustDirEne,
            WindDirection::EastSouthEast => Feature::WindGustDirEse,
            WindDirection::North => Feature::WindGustDirN,
            WindDirection::NorthEast => Feature::WindGustDirNe,
            WindDirection::NorthNorthEast => Feature::WindGustDirNne,
            WindDirection::NorthNorthWest => Feature::WindGustDirNnw,
            WindDirection::NorthWest => Feature::WindGustDirNw,
            WindDirection::South => Feature::WindGustDirS,
            WindDirection::SouthEast => Feature::WindGustDirSe,
            WindDirection::SouthSouthEast => Feature::WindGustDirSse,
            WindDirection::SouthSouthWest => Feature::WindGustDirSsw,
            WindDirection::SouthWest => Feature::WindGustDirSw,
            WindDirection::West => Feature::WindGustDirW,
            WindDirection::WestNorthWest => Feature::WindGustDirWnw,
            WindDirection::WestSouthWest => Feature::WindGustDirWsw,
            WindDirection::East | WindDirection::Unknown => return None,
        };
        Some(feature)
    }
}

/// Check a model's declared column names against [`FEATURE_NAMES`]
pub fn verify_schema<S: AsRef<str>>(names: &[S]) -> Result<(), FeatureError> {
    if names.len() != FEATURE_DIMENSION {
        return Err(FeatureError::DimensionMismatch {
            expected: FEATURE_DIMENSION,
            actual: names.len(),
        });
    }
    for (position, (expected, actual)) in FEATURE_NAMES.iter().zip(names).enumerate() {
        if *expected != actual.as_ref() {
            return Err(FeatureError::SchemaMismatch {
                position,
                expected: expected.to_string(),
                actual: actual.as_ref().to_string(),
            });
        }
    }
    Ok(())
}
