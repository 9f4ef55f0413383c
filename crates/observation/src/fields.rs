//! Form Field Catalogue
//!
//! Labels, help text and defaults for every input the form exposes.

use serde::Serialize;

/// An input field of the observation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    MinTemp,
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
    WindGustDir,
}

impl Field {
    /// Every field, in form order
    pub const ALL: [Field; 17] = [
        Field::MinTemp,
        Field::MaxTemp,
        Field::Rainfall,
        Field::WindGustSpeed,
        Field::WindSpeed9am,
        Field::WindSpeed3pm,
        Field::Humidity9am,
        Field::Humidity3pm,
        Field::Pressure9am,
        Field::Pressure3pm,
        Field::Cloud9am,
        Field::Cloud3pm,
        Field::Temp9am,
        Field::Temp3pm,
        Field::RainToday,
        Field::Month,
        Field::WindGustDir,
    ];

    /// Key used in JSON bodies and form submissions
    pub fn key(&self) -> &'static str {
        match self {
            Field::MinTemp => "MinTemp",
            Field::MaxTemp => "MaxTemp",
            Field::Rainfall => "Rainfall",
            Field::WindGustSpeed => "WindGustSpeed",
            Field::WindSpeed9am => "WindSpeed9am",
            Field::WindSpeed3pm => "WindSpeed3pm",
            Field::Humidity9am => "Humidity9am",
            Field::Humidity3pm => "Humidity3pm",
            Field::Pressure9am => "Pressure9am",
            Field::Pressure3pm => "Pressure3pm",
            Field::Cloud9am => "Cloud9am",
            Field::Cloud3pm => "Cloud3pm",
            Field::Temp9am => "Temp9am",
            Field::Temp3pm => "Temp3pm",
            Field::RainToday => "RainToday",
            Field::Month => "Month",
            Field::WindGustDir => "WindGustDir",
        }
    }

    /// Look up a field by its key
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// How a field is entered and encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Real-valued measurement
    Measure,
    /// Whole number on a bounded scale
    Count,
    /// Yes/No flag
    Flag,
    /// Compass direction
    Direction,
}

/// Presentation metadata for one form field
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub help: &'static str,
    pub unit: Option<&'static str>,
    pub kind: FieldKind,
    /// Pre-filled value (0/1 for flags, unused for directions)
    pub default: f64,
    pub step: f64,
}

static FIELD_SPECS: [FieldSpec; 17] = [
    FieldSpec {
        field: Field::MinTemp,
        label: "Minimum Temperature",
        help: "Lowest temperature recorded in the 24 hours to 9am",
        unit: Some("°C"),
        kind: FieldKind::Measure,
        default: 13.4,
        step: 0.1,
    },
    FieldSpec {
        field: Field::MaxTemp,
        label: "Maximum Temperature",
        help: "Highest temperature recorded in the 24 hours to 3pm",
        unit: Some("°C"),
        kind: FieldKind::Measure,
        default: 22.9,
        step: 0.1,
    },
    FieldSpec {
        field: Field::Rainfall,
        label: "Rainfall",
        help: "Amount of rainfall recorded in the 24 hours to 9am (0.0 for no rain)",
        unit: Some("mm"),
        kind: FieldKind::Measure,
        default: 0.6,
        step: 0.1,
    },
    FieldSpec {
        field: Field::WindGustSpeed,
        label: "Wind Gust Speed",
        help: "Speed of the strongest wind gust in the 24 hours to midnight",
        unit: Some("km/h"),
        kind: FieldKind::Measure,
        default: 44.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::WindSpeed9am,
        label: "Wind Speed at 9am",
        help: "Wind speed averaged over 10 minutes prior to 9am",
        unit: Some("km/h"),
        kind: FieldKind::Measure,
        default: 20.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::WindSpeed3pm,
        label: "Wind Speed at 3pm",
        help: "Wind speed averaged over 10 minutes prior to 3pm",
        unit: Some("km/h"),
        kind: FieldKind::Measure,
        default: 24.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::Humidity9am,
        label: "Humidity at 9am",
        help: "Relative humidity at 9am",
        unit: Some("%"),
        kind: FieldKind::Count,
        default: 71.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::Humidity3pm,
        label: "Humidity at 3pm",
        help: "Relative humidity at 3pm",
        unit: Some("%"),
        kind: FieldKind::Count,
        default: 22.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::Pressure9am,
        label: "Pressure at 9am",
        help: "Atmospheric pressure reduced to mean sea level at 9am",
        unit: Some("hPa"),
        kind: FieldKind::Measure,
        default: 1007.7,
        step: 0.1,
    },
    FieldSpec {
        field: Field::Pressure3pm,
        label: "Pressure at 3pm",
        help: "Atmospheric pressure reduced to mean sea level at 3pm",
        unit: Some("hPa"),
        kind: FieldKind::Measure,
        default: 1007.1,
        step: 0.1,
    },
    FieldSpec {
        field: Field::Cloud9am,
        label: "Cloud Cover at 9am",
        help: "Fraction of sky obscured by cloud at 9am. 0=clear, 8=overcast.",
        unit: Some("oktas"),
        kind: FieldKind::Count,
        default: 8.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::Cloud3pm,
        label: "Cloud Cover at 3pm",
        help: "Fraction of sky obscured by cloud at 3pm. 0=clear, 8=overcast.",
        unit: Some("oktas"),
        kind: FieldKind::Count,
        default: 5.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::Temp9am,
        label: "Temperature at 9am",
        help: "Temperature at 9am",
        unit: Some("°C"),
        kind: FieldKind::Measure,
        default: 16.9,
        step: 0.1,
    },
    FieldSpec {
        field: Field::Temp3pm,
        label: "Temperature at 3pm",
        help: "Temperature at 3pm",
        unit: Some("°C"),
        kind: FieldKind::Measure,
        default: 21.8,
        step: 0.1,
    },
    FieldSpec {
        field: Field::RainToday,
        label: "Did it rain today?",
        help: "Did it rain in the 24 hours to 9am today? 'Yes' if Rainfall >= 1mm, otherwise 'No'.",
        unit: None,
        kind: FieldKind::Flag,
        default: 0.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::Month,
        label: "Month",
        help: "Month of the year (1 for January, 12 for December)",
        unit: None,
        kind: FieldKind::Count,
        default: 12.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::WindGustDir,
        label: "Wind Gust Direction",
        help: "Direction of the strongest wind gust in the 24 hours to midnight (e.g. W, ENE, N)",
        unit: None,
        kind: FieldKind::Direction,
        default: 0.0,
        step: 1.0,
    },
];

/// Metadata for every form field, in form order
pub fn field_specs() -> &'static [FieldSpec] {
    &FIELD_SPECS
}
