//! Weather Observations
//!
//! Provides the immutable [`WeatherObservation`] value object, the raw
//! [`ObservationInput`] collected from a form or JSON body, and the range
//! validation that turns one into the other.

mod error;
mod fields;
mod observation;
mod validator;

pub use error::{LimitsError, ObservationError, ValidationError};
pub use fields::{field_specs, Field, FieldKind, FieldSpec};
pub use observation::{ObservationInput, RainToday, WeatherObservation, WindDirection};
pub use validator::{ObservationLimits, Validator};
