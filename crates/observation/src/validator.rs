//! Observation Validator for Range Checking

use crate::error::{LimitsError, ObservationError, ValidationError};
use crate::fields::Field;
use crate::observation::{ObservationInput, RainToday, WeatherObservation, WindDirection};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inclusive valid ranges for each group of measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationLimits {
    /// Air temperature range (°C), used for min/max/9am/3pm
    pub temperature_range: (f64, f64),
    /// Rainfall range (mm)
    pub rainfall_range: (f64, f64),
    /// Wind speed range (km/h), gusts included
    pub wind_speed_range: (f64, f64),
    /// Relative humidity range (%)
    pub humidity_range: (f64, f64),
    /// Mean sea level pressure range (hPa)
    pub pressure_range: (f64, f64),
    /// Cloud cover range (oktas)
    pub cloud_range: (f64, f64),
    /// Month range
    pub month_range: (f64, f64),
}

impl Default for ObservationLimits {
    fn default() -> Self {
        Self {
            temperature_range: (-50.0, 60.0),
            rainfall_range: (0.0, 1000.0),
            wind_speed_range: (0.0, 300.0),
            humidity_range: (0.0, 100.0),
            pressure_range: (850.0, 1100.0),
            cloud_range: (0.0, 9.0),
            month_range: (1.0, 12.0),
        }
    }
}

impl ObservationLimits {
    /// Range that applies to a numeric field
    pub fn range_for(&self, field: Field) -> Option<(f64, f64)> {
        let range = match field {
            Field::MinTemp | Field::MaxTemp | Field::Temp9am | Field::Temp3pm => {
                self.temperature_range
            }
            Field::Rainfall => self.rainfall_range,
            Field::WindGustSpeed | Field::WindSpeed9am | Field::WindSpeed3pm => {
                self.wind_speed_range
            }
            Field::Humidity9am | Field::Humidity3pm => self.humidity_range,
            Field::Pressure9am | Field::Pressure3pm => self.pressure_range,
            Field::Cloud9am | Field::Cloud3pm => self.cloud_range,
            Field::Month => self.month_range,
            Field::RainToday | Field::WindGustDir => return None,
        };
        Some(range)
    }

    /// Reject ranges that would turn every submission away
    pub fn check(&self) -> Result<(), LimitsError> {
        let measures = [
            ("temperature_range", self.temperature_range),
            ("rainfall_range", self.rainfall_range),
            ("wind_speed_range", self.wind_speed_range),
            ("pressure_range", self.pressure_range),
        ];
        let counts = [
            ("humidity_range", self.humidity_range),
            ("cloud_range", self.cloud_range),
            ("month_range", self.month_range),
        ];

        for (name, (min, max)) in measures.into_iter().chain(counts) {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(LimitsError::InvalidRange { name, min, max });
            }
        }
        for (name, (min, max)) in counts {
            if min < 0.0 || max > f64::from(u8::MAX) {
                return Err(LimitsError::CountOutOfScale { name, min, max });
            }
        }
        Ok(())
    }
}

/// Validator turning raw input into a [`WeatherObservation`]
#[derive(Debug, Clone, Default)]
pub struct Validator {
    limits: ObservationLimits,
}

impl Validator {
    /// Create a new validator with given limits
    pub fn new(limits: ObservationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ObservationLimits {
        &self.limits
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Require a present, finite, in-range real value
    pub fn validate_measure(&self, field: Field, value: Option<f64>) -> Result<f64, ValidationError> {
        let value = value.ok_or(ValidationError::MissingField(field.key()))?;
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field: field.key() });
        }
        if let Some(range) = self.limits.range_for(field) {
            self.validate_range(field.key(), value, range)?;
        }
        Ok(value)
    }

    /// Require a present, whole, in-range value on a small scale
    pub fn validate_count(&self, field: Field, value: Option<f64>) -> Result<u8, ValidationError> {
        let value = self.validate_measure(field, value)?;
        if value.fract() != 0.0 {
            return Err(ValidationError::NotInteger {
                field: field.key(),
                value,
            });
        }
        u8::try_from(value as i64).map_err(|_| ValidationError::OutOfRange {
            field: field.key(),
            value,
            min: 0.0,
            max: f64::from(u8::MAX),
        })
    }

    /// Validate every field, reporting all failures at once
    pub fn validate(&self, input: &ObservationInput) -> Result<WeatherObservation, ObservationError> {
        let mut errors = Vec::new();

        let mut measure = |field: Field| -> f64 {
            self.validate_measure(field, input.number(field))
                .unwrap_or_else(|e| {
                    errors.push(e);
                    0.0
                })
        };
        let min_temp = measure(Field::MinTemp);
        let max_temp = measure(Field::MaxTemp);
        let rainfall = measure(Field::Rainfall);
        let wind_gust_speed = measure(Field::WindGustSpeed);
        let wind_speed_9am = measure(Field::WindSpeed9am);
        let wind_speed_3pm = measure(Field::WindSpeed3pm);
        let pressure_9am = measure(Field::Pressure9am);
        let pressure_3pm = measure(Field::Pressure3pm);
        let temp_9am = measure(Field::Temp9am);
        let temp_3pm = measure(Field::Temp3pm);

        let mut count = |field: Field| -> u8 {
            self.validate_count(field, input.number(field))
                .unwrap_or_else(|e| {
                    errors.push(e);
                    0
                })
        };
        let humidity_9am = count(Field::Humidity9am);
        let humidity_3pm = count(Field::Humidity3pm);
        let cloud_9am = count(Field::Cloud9am);
        let cloud_3pm = count(Field::Cloud3pm);
        let month = count(Field::Month);

        let rain_today = match input.rain_today.as_deref() {
            None => RainToday::No,
            Some(raw) => RainToday::parse(raw).unwrap_or_else(|e| {
                errors.push(e);
                RainToday::No
            }),
        };

        let wind_gust_dir = input
            .wind_gust_dir
            .as_deref()
            .map(WindDirection::parse)
            .unwrap_or_default();
        if wind_gust_dir == WindDirection::Unknown {
            debug!(
                "Wind gust direction {:?} not recognised, encoding as unknown",
                input.wind_gust_dir
            );
        }

        if !errors.is_empty() {
            debug!("Observation rejected with {} field errors", errors.len());
            return Err(ObservationError::InvalidObservation(errors));
        }

        Ok(WeatherObservation {
            min_temp,
            max_temp,
            rainfall,
            wind_gust_speed,
            wind_speed_9am,
            wind_speed_3pm,
            humidity_9am,
            humidity_3pm,
            pressure_9am,
            pressure_3pm,
            cloud_9am,
            cloud_3pm,
            temp_9am,
            temp_3pm,
            rain_today,
            month,
            wind_gust_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_input() -> ObservationInput {
        ObservationInput::form_defaults()
    }

    #[test]
    fn test_default_limits_pass_check() {
        assert_eq!(ObservationLimits::default().check(), Ok(()));
    }

    #[test]
    fn test_inverted_range_fails_check() {
        let limits = ObservationLimits {
            pressure_range: (1100.0, 850.0),
            ..ObservationLimits::default()
        };
        assert_eq!(
            limits.check(),
            Err(LimitsError::InvalidRange {
                name: "pressure_range",
                min: 1100.0,
                max: 850.0
            })
        );
    }

    #[test]
    fn test_count_range_beyond_byte_fails_check() {
        let limits = ObservationLimits {
            humidity_range: (0.0, 300.0),
            ..ObservationLimits::default()
        };
        assert!(matches!(
            limits.check(),
            Err(LimitsError::CountOutOfScale { name: "humidity_range", .. })
        ));

        let limits = ObservationLimits {
            cloud_range: (f64::NAN, 9.0),
            ..ObservationLimits::default()
        };
        assert!(matches!(limits.check(), Err(LimitsError::InvalidRange { .. })));
    }

    #[test]
    fn test_form_defaults_are_valid() {
        let validator = Validator::default();
        let obs = validator.validate(&valid_input()).unwrap();
        assert_eq!(obs.min_temp(), 13.4);
        assert_eq!(obs.humidity_9am(), 71);
        assert_eq!(obs.cloud_9am(), 8);
        assert_eq!(obs.month(), 12);
        assert_eq!(obs.rain_today(), RainToday::No);
        assert_eq!(obs.wind_gust_dir(), WindDirection::Unknown);
    }

    #[test]
    fn test_humidity_boundaries() {
        let validator = Validator::default();
        for value in [0.0, 100.0] {
            let input = ObservationInput {
                humidity_9am: Some(value),
                humidity_3pm: Some(value),
                ..valid_input()
            };
            assert!(validator.validate(&input).is_ok(), "humidity {value} rejected");
        }
        for value in [-1.0, 101.0] {
            let input = ObservationInput {
                humidity_3pm: Some(value),
                ..valid_input()
            };
            let err = validator.validate(&input).unwrap_err();
            assert_eq!(err.errors()[0].field(), "Humidity3pm");
        }
    }

    #[test]
    fn test_cloud_boundaries() {
        let validator = Validator::default();
        for value in [0.0, 9.0] {
            let input = ObservationInput {
                cloud_9am: Some(value),
                cloud_3pm: Some(value),
                ..valid_input()
            };
            assert!(validator.validate(&input).is_ok());
        }
        let input = ObservationInput {
            cloud_9am: Some(10.0),
            ..valid_input()
        };
        assert!(matches!(
            validator.validate(&input).unwrap_err().errors(),
            [ValidationError::OutOfRange { field: "Cloud9am", .. }]
        ));
    }

    #[test]
    fn test_month_boundaries() {
        let validator = Validator::default();
        for value in [1.0, 12.0] {
            let input = ObservationInput {
                month: Some(value),
                ..valid_input()
            };
            assert!(validator.validate(&input).is_ok());
        }
        for value in [0.0, 13.0] {
            let input = ObservationInput {
                month: Some(value),
                ..valid_input()
            };
            assert!(validator.validate(&input).is_err());
        }
    }

    #[test]
    fn test_fractional_count_rejected() {
        let validator = Validator::default();
        let input = ObservationInput {
            humidity_9am: Some(71.5),
            ..valid_input()
        };
        assert_eq!(
            validator.validate(&input).unwrap_err().errors(),
            &[ValidationError::NotInteger {
                field: "Humidity9am",
                value: 71.5
            }]
        );
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let validator = Validator::default();
        let input = ObservationInput {
            min_temp: None,
            pressure_3pm: None,
            month: None,
            ..valid_input()
        };
        let err = validator.validate(&input).unwrap_err();
        let fields: Vec<&str> = err.errors().iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["MinTemp", "Pressure3pm", "Month"]);
    }

    #[test]
    fn test_non_finite_rejected() {
        let validator = Validator::default();
        let input = ObservationInput {
            rainfall: Some(f64::NAN),
            ..valid_input()
        };
        assert_eq!(
            validator.validate(&input).unwrap_err().errors(),
            &[ValidationError::NotFinite { field: "Rainfall" }]
        );
    }

    #[test]
    fn test_rain_today_absent_defaults_to_no() {
        let validator = Validator::default();
        let input = ObservationInput {
            rain_today: None,
            ..valid_input()
        };
        assert_eq!(validator.validate(&input).unwrap().rain_today(), RainToday::No);

        let input = ObservationInput {
            rain_today: Some("perhaps".to_string()),
            ..valid_input()
        };
        assert!(validator.validate(&input).is_err());
    }

    #[test]
    fn test_unknown_direction_is_not_an_error() {
        let validator = Validator::default();
        let input = ObservationInput {
            wind_gust_dir: Some("unknown-garbage".to_string()),
            ..valid_input()
        };
        let obs = validator.validate(&input).unwrap();
        assert_eq!(obs.wind_gust_dir(), WindDirection::Unknown);
    }

    #[test]
    fn test_custom_limits() {
        let validator = Validator::new(ObservationLimits {
            temperature_range: (0.0, 30.0),
            ..Default::default()
        });
        let input = ObservationInput {
            max_temp: Some(35.0),
            ..valid_input()
        };
        assert!(validator.validate(&input).is_err());
    }

    proptest! {
        #[test]
        fn prop_in_range_humidity_accepted(h in 0u8..=100) {
            let validator = Validator::default();
            let input = ObservationInput {
                humidity_9am: Some(f64::from(h)),
                ..valid_input()
            };
            let obs = validator.validate(&input).unwrap();
            prop_assert_eq!(obs.humidity_9am(), h);
        }

        #[test]
        fn prop_out_of_range_pressure_rejected(p in 1100.01f64..5000.0) {
            let validator = Validator::default();
            let input = ObservationInput {
                pressure_9am: Some(p),
                ..valid_input()
            };
            prop_assert!(validator.validate(&input).is_err());
        }
    }
}
