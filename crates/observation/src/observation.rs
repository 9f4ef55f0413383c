//! Observation Types

use crate::error::{ObservationError, ValidationError};
use crate::fields::{field_specs, Field};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Whether it rained in the 24 hours to 9am
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RainToday {
    #[default]
    No,
    Yes,
}

impl RainToday {
    /// Binary flag fed to the model
    pub fn as_flag(&self) -> u8 {
        match self {
            RainToday::No => 0,
            RainToday::Yes => 1,
        }
    }

    /// Parse a form value; empty means `No`
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "no" | "0" | "false" => Ok(RainToday::No),
            "yes" | "1" | "true" => Ok(RainToday::Yes),
            _ => Err(ValidationError::InvalidFlag {
                field: Field::RainToday.key(),
                raw: raw.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RainToday::No => "No",
            RainToday::Yes => "Yes",
        }
    }
}

/// Direction of the strongest wind gust
///
/// Any label outside the sixteen compass points parses to `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NNE")]
    NorthNorthEast,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "ENE")]
    EastNorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "ESE")]
    EastSouthEast,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "SSE")]
    SouthSouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SSW")]
    SouthSouthWest,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "WSW")]
    WestSouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "WNW")]
    WestNorthWest,
    #[serde(rename = "NW")]
    NorthWest,
    #[serde(rename = "NNW")]
    NorthNorthWest,
    #[default]
    #[serde(rename = "None")]
    Unknown,
}

impl WindDirection {
    /// The sixteen compass points, clockwise from north
    pub const COMPASS: [WindDirection; 16] = [
        WindDirection::North,
        WindDirection::NorthNorthEast,
        WindDirection::NorthEast,
        WindDirection::EastNorthEast,
        WindDirection::East,
        WindDirection::EastSouthEast,
        WindDirection::SouthEast,
        WindDirection::SouthSouthEast,
        WindDirection::South,
        WindDirection::SouthSouthWest,
        WindDirection::SouthWest,
        WindDirection::WestSouthWest,
        WindDirection::West,
        WindDirection::WestNorthWest,
        WindDirection::NorthWest,
        WindDirection::NorthNorthWest,
    ];

    /// Compass label, `None` for an unknown direction
    pub fn label(&self) -> Option<&'static str> {
        let label = match self {
            WindDirection::North => "N",
            WindDirection::NorthNorthEast => "NNE",
            WindDirection::NorthEast => "NE",
            WindDirection::EastNorthEast => "ENE",
            WindDirection::East => "E",
            WindDirection::EastSouthEast => "ESE",
            WindDirection::SouthEast => "SE",
            WindDirection::SouthSouthEast => "SSE",
            WindDirection::South => "S",
            WindDirection::SouthSouthWest => "SSW",
            WindDirection::SouthWest => "SW",
            WindDirection::WestSouthWest => "WSW",
            WindDirection::West => "W",
            WindDirection::WestNorthWest => "WNW",
            WindDirection::NorthWest => "NW",
            WindDirection::NorthNorthWest => "NNW",
            WindDirection::Unknown => return None,
        };
        Some(label)
    }

    /// Parse a compass label, case-insensitively. Never fails.
    pub fn parse(raw: &str) -> Self {
        let wanted = raw.trim().to_ascii_uppercase();
        Self::COMPASS
            .into_iter()
            .find(|d| d.label() == Some(wanted.as_str()))
            .unwrap_or(WindDirection::Unknown)
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("None"))
    }
}

/// One day of weather measurements, validated
///
/// Only obtainable through [`crate::Validator::validate`], so every value is
/// inside its configured range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherObservation {
    pub(crate) min_temp: f64,
    pub(crate) max_temp: f64,
    pub(crate) rainfall: f64,
    pub(crate) wind_gust_speed: f64,
    pub(crate) wind_speed_9am: f64,
    pub(crate) wind_speed_3pm: f64,
    pub(crate) humidity_9am: u8,
    pub(crate) humidity_3pm: u8,
    pub(crate) pressure_9am: f64,
    pub(crate) pressure_3pm: f64,
    pub(crate) cloud_9am: u8,
    pub(crate) cloud_3pm: u8,
    pub(crate) temp_9am: f64,
    pub(crate) temp_3pm: f64,
    pub(crate) rain_today: RainToday,
    pub(crate) month: u8,
    pub(crate) wind_gust_dir: WindDirection,
}

impl WeatherObservation {
    pub fn min_temp(&self) -> f64 {
        self.min_temp
    }
    pub fn max_temp(&self) -> f64 {
        self.max_temp
    }
    pub fn rainfall(&self) -> f64 {
        self.rainfall
    }
    pub fn wind_gust_speed(&self) -> f64 {
        self.wind_gust_speed
    }
    pub fn wind_speed_9am(&self) -> f64 {
        self.wind_speed_9am
    }
    pub fn wind_speed_3pm(&self) -> f64 {
        self.wind_speed_3pm
    }
    pub fn humidity_9am(&self) -> u8 {
        self.humidity_9am
    }
    pub fn humidity_3pm(&self) -> u8 {
        self.humidity_3pm
    }
    pub fn pressure_9am(&self) -> f64 {
        self.pressure_9am
    }
    pub fn pressure_3pm(&self) -> f64 {
        self.pressure_3pm
    }
    pub fn cloud_9am(&self) -> u8 {
        self.cloud_9am
    }
    pub fn cloud_3pm(&self) -> u8 {
        self.cloud_3pm
    }
    pub fn temp_9am(&self) -> f64 {
        self.temp_9am
    }
    pub fn temp_3pm(&self) -> f64 {
        self.temp_3pm
    }
    pub fn rain_today(&self) -> RainToday {
        self.rain_today
    }
    pub fn month(&self) -> u8 {
        self.month
    }
    pub fn wind_gust_dir(&self) -> WindDirection {
        self.wind_gust_dir
    }
}

/// Raw observation as submitted by the user
///
/// Every field is optional here; [`crate::Validator`] decides what is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObservationInput {
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub rainfall: Option<f64>,
    pub wind_gust_speed: Option<f64>,
    pub wind_speed_9am: Option<f64>,
    pub wind_speed_3pm: Option<f64>,
    pub humidity_9am: Option<f64>,
    pub humidity_3pm: Option<f64>,
    pub pressure_9am: Option<f64>,
    pub pressure_3pm: Option<f64>,
    pub cloud_9am: Option<f64>,
    pub cloud_3pm: Option<f64>,
    pub temp_9am: Option<f64>,
    pub temp_3pm: Option<f64>,
    /// "Yes"/"No", or a 1/0 flag
    #[serde(default, deserialize_with = "flag_text")]
    pub rain_today: Option<String>,
    pub month: Option<f64>,
    pub wind_gust_dir: Option<String>,
}

/// Accept a flag as text, number or bool; [`RainToday::parse`] judges it
fn flag_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Text(String),
        Number(f64),
        Bool(bool),
    }

    Ok(Option::<RawFlag>::deserialize(deserializer)?.map(|raw| match raw {
        RawFlag::Text(text) => text,
        RawFlag::Number(number) => number.to_string(),
        RawFlag::Bool(flag) => flag.to_string(),
    }))
}

impl ObservationInput {
    /// Input pre-filled with the form defaults
    pub fn form_defaults() -> Self {
        let mut input = Self::default();
        for spec in field_specs() {
            if let Some(slot) = input.number_mut(spec.field) {
                *slot = Some(spec.default);
            }
        }
        input.rain_today = Some(RainToday::No.as_str().to_string());
        input.wind_gust_dir = Some(WindDirection::Unknown.to_string());
        input
    }

    /// Build from urlencoded form pairs
    ///
    /// Empty values are treated as missing. Unknown keys are ignored.
    pub fn from_form<'a, I>(pairs: I) -> Result<Self, ObservationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut input = Self::default();
        let mut errors = Vec::new();

        for (key, raw) in pairs {
            let Some(field) = Field::from_key(key) else {
                continue;
            };
            let value = raw.trim();
            if value.is_empty() {
                continue;
            }
            match field {
                Field::RainToday => input.rain_today = Some(value.to_string()),
                Field::WindGustDir => input.wind_gust_dir = Some(value.to_string()),
                _ => match value.parse::<f64>() {
                    Ok(number) => {
                        if let Some(slot) = input.number_mut(field) {
                            *slot = Some(number);
                        }
                    }
                    Err(_) => errors.push(ValidationError::NotANumber {
                        field: field.key(),
                        raw: value.to_string(),
                    }),
                },
            }
        }

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(ObservationError::InvalidObservation(errors))
        }
    }

    /// Numeric value of a field, `None` for text fields or when absent
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::MinTemp => self.min_temp,
            Field::MaxTemp => self.max_temp,
            Field::Rainfall => self.rainfall,
            Field::WindGustSpeed => self.wind_gust_speed,
            Field::WindSpeed9am => self.wind_speed_9am,
            Field::WindSpeed3pm => self.wind_speed_3pm,
            Field::Humidity9am => self.humidity_9am,
            Field::Humidity3pm => self.humidity_3pm,
            Field::Pressure9am => self.pressure_9am,
            Field::Pressure3pm => self.pressure_3pm,
            Field::Cloud9am => self.cloud_9am,
            Field::Cloud3pm => self.cloud_3pm,
            Field::Temp9am => self.temp_9am,
            Field::Temp3pm => self.temp_3pm,
            Field::Month => self.month,
            Field::RainToday | Field::WindGustDir => None,
        }
    }

    fn number_mut(&mut self, field: Field) -> Option<&mut Option<f64>> {
        let slot = match field {
            Field::MinTemp => &mut self.min_temp,
            Field::MaxTemp => &mut self.max_temp,
            Field::Rainfall => &mut self.rainfall,
            Field::WindGustSpeed => &mut self.wind_gust_speed,
            Field::WindSpeed9am => &mut self.wind_speed_9am,
            Field::WindSpeed3pm => &mut self.wind_speed_3pm,
            Field::Humidity9am => &mut self.humidity_9am,
            Field::Humidity3pm => &mut self.humidity_3pm,
            Field::Pressure9am => &mut self.pressure_9am,
            Field::Pressure3pm => &mut self.pressure_3pm,
            Field::Cloud9am => &mut self.cloud_9am,
            Field::Cloud3pm => &mut self.cloud_3pm,
            Field::Temp9am => &mut self.temp_9am,
            Field::Temp3pm => &mut self.temp_3pm,
            Field::Month => &mut self.month,
            Field::RainToday | Field::WindGustDir => return None,
        };
        Some(slot)
    }
}
