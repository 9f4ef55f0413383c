//! Prediction Labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Will it rain tomorrow?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    No,
    Yes,
}

impl Label {
    /// Label as the model was trained on it
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::No => "No",
            Label::Yes => "Yes",
        }
    }

    /// Parse a string class label, case-insensitively
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "no" => Some(Label::No),
            "yes" => Some(Label::Yes),
            _ => None,
        }
    }

    /// Integer class index: 1 is rain, 0 is no rain
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Label::No),
            1 => Some(Label::Yes),
            _ => None,
        }
    }

    /// Label for a probability of rain
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            Label::Yes
        } else {
            Label::No
        }
    }

    pub fn is_rain(&self) -> bool {
        matches!(self, Label::Yes)
    }

    /// Short answer shown as the result
    pub fn headline(&self) -> &'static str {
        match self {
            Label::No => "No ☀️",
            Label::Yes => "Yes 🌧️",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            Label::No => "Clear skies expected!",
            Label::Yes => "Rain is likely! Don't forget your umbrella!",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Label::No => "Enjoy your day!",
            Label::Yes => "Be prepared for some wet weather.",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_class() {
        assert_eq!(Label::parse("Yes"), Some(Label::Yes));
        assert_eq!(Label::parse(" no "), Some(Label::No));
        assert_eq!(Label::parse("maybe"), None);
        assert_eq!(Label::from_class(1), Some(Label::Yes));
        assert_eq!(Label::from_class(0), Some(Label::No));
        assert_eq!(Label::from_class(2), None);
    }

    #[test]
    fn test_threshold() {
        assert_eq!(Label::from_probability(0.5, 0.5), Label::Yes);
        assert_eq!(Label::from_probability(0.49, 0.5), Label::No);
    }

    #[test]
    fn test_messages() {
        assert!(Label::Yes.is_rain());
        assert_eq!(Label::No.detail(), "Clear skies expected!");
        assert_eq!(Label::Yes.advice(), "Be prepared for some wet weather.");
        assert_eq!(Label::Yes.to_string(), "Yes");
    }
}
