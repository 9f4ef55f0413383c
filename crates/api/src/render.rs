//! HTML rendering for the prediction form

use feature_engine::Feature;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use observation::{field_specs, Field, FieldKind, FieldSpec, ObservationInput, ObservationLimits};
use std::collections::HashMap;

use crate::error::PREDICTION_HINT;
use crate::{ApiError, PredictionOutcome};

/// Raw form values keyed by field name
pub type FormValues = HashMap<String, String>;

/// Values the form is pre-filled with on first load
pub fn default_values() -> FormValues {
    let input = ObservationInput::form_defaults();
    Field::ALL
        .into_iter()
        .filter_map(|field| {
            let value = match field {
                Field::RainToday => input.rain_today.clone(),
                Field::WindGustDir => input.wind_gust_dir.clone(),
                _ => input.number(field).map(|v| v.to_string()),
            }?;
            Some((field.key().to_string(), value))
        })
        .collect()
}

/// Labels offered in the direction picker, in model column order
fn direction_choices() -> impl Iterator<Item = &'static str> {
    std::iter::once("None").chain(
        Feature::WIND_GUST_DIRECTIONS
            .into_iter()
            .map(|f| f.name().trim_start_matches("WindGustDir_")),
    )
}

fn label_text(spec: &FieldSpec) -> String {
    match spec.unit {
        Some(unit) => format!("{} ({})", spec.label, unit),
        None => spec.label.to_string(),
    }
}

fn select(out: &mut String, name: &str, current: &str, choices: impl Iterator<Item = &'static str>) {
    out.push_str(&format!(r#"<select name="{}" id="{}">"#, attr(name), attr(name)));
    for choice in choices {
        let selected = if choice.eq_ignore_ascii_case(current) {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            attr(choice),
            selected,
            text(choice)
        ));
    }
    out.push_str("</select>");
}

fn field_html(out: &mut String, spec: &FieldSpec, limits: &ObservationLimits, values: &FormValues) {
    let key = spec.field.key();
    let current = values.get(key).map(String::as_str).unwrap_or("");

    out.push_str(&format!(
        r#"<div class="field"><label for="{}" title="{}">{}</label>"#,
        attr(key),
        attr(spec.help),
        text(&label_text(spec))
    ));
    match spec.kind {
        FieldKind::Measure | FieldKind::Count => {
            out.push_str(&format!(
                r#"<input type="number" name="{}" id="{}" value="{}" step="{}""#,
                attr(key),
                attr(key),
                attr(current),
                spec.step
            ));
            if let Some((min, max)) = limits.range_for(spec.field) {
                out.push_str(&format!(r#" min="{}" max="{}""#, min, max));
            }
            out.push_str(" required>");
        }
        FieldKind::Flag => select(out, key, current, ["No", "Yes"].into_iter()),
        FieldKind::Direction => select(out, key, current, direction_choices()),
    }
    out.push_str(&format!(r#"<small>{}</small></div>"#, text(spec.help)));
}

fn error_html(out: &mut String, err: &ApiError) {
    out.push_str(r#"<div class="error">"#);
    match err {
        ApiError::InvalidObservation(inner) => {
            out.push_str("<p>Please correct the highlighted values:</p><ul>");
            for e in inner.errors() {
                out.push_str(&format!("<li>{}</li>", text(&e.to_string())));
            }
            out.push_str("</ul>");
        }
        ApiError::MalformedBody { .. } => {
            out.push_str(&format!("<p>{}</p>", text(&err.to_string())));
        }
        ApiError::PredictionFailure(_) => {
            out.push_str(&format!(
                "<p>{}</p><p>{}</p>",
                text(&err.to_string()),
                text(PREDICTION_HINT)
            ));
        }
    }
    out.push_str("</div>");
}

fn result_html(out: &mut String, outcome: &PredictionOutcome) {
    let label = outcome.result.prediction.label;
    let class = if label.is_rain() { "rain" } else { "clear" };
    out.push_str(&format!(
        r#"<div class="result {}"><p>Prediction Complete!</p><h2>Will it rain tomorrow? {}</h2><p>{}</p><p>{}</p>"#,
        class,
        text(label.headline()),
        text(label.detail()),
        text(label.advice())
    ));
    if let Some(probability) = outcome.result.prediction.probability {
        out.push_str(&format!("<p>Probability of rain: {:.0}%</p>", probability * 100.0));
    }
    out.push_str("<details><summary>Model input</summary><table>");
    for (name, value) in outcome.features.named() {
        out.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>", text(name), value));
    }
    out.push_str("</table></details></div>");
}

/// Render the full page: form, plus an optional result or error
pub fn page(
    limits: &ObservationLimits,
    values: &FormValues,
    outcome: Option<&PredictionOutcome>,
    error: Option<&ApiError>,
) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str(concat!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">",
        "<title>Weather Prediction in Australia</title></head><body>",
        "<h1>☔ Weather Prediction in Australia</h1>",
        "<p>Enter the weather parameters below to predict if it will rain tomorrow.</p>",
    ));

    if let Some(err) = error {
        error_html(&mut out, err);
    }
    if let Some(outcome) = outcome {
        result_html(&mut out, outcome);
    }

    out.push_str(r#"<form method="post" action="/"><h2>Daily Weather Measurements</h2>"#);
    for spec in field_specs() {
        field_html(&mut out, spec, limits, values);
    }
    out.push_str(r#"<button type="submit">Predict Rain Tomorrow</button></form>"#);
    out.push_str("<hr><small>This application uses a pre-trained machine learning model to predict rainfall in Australia based on the provided weather parameters.</small></body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let values = default_values();
        assert_eq!(values.len(), Field::ALL.len());
        assert_eq!(values["MinTemp"], "13.4");
        assert_eq!(values["Month"], "12");
        assert_eq!(values["RainToday"], "No");
        assert_eq!(values["WindGustDir"], "None");
    }

    #[test]
    fn test_direction_choices_follow_columns() {
        let choices: Vec<&str> = direction_choices().collect();
        assert_eq!(choices.len(), 16);
        assert_eq!(choices[0], "None");
        assert_eq!(choices[1], "ENE");
        assert_eq!(choices[15], "WSW");
    }

    #[test]
    fn test_page_escapes_submitted_values() {
        let mut values = default_values();
        values.insert("MinTemp".to_string(), r#""><script>"#.to_string());
        let html = page(&ObservationLimits::default(), &values, None, None);
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"name="Humidity9am" id="Humidity9am" value="71" step="1" min="0" max="100""#));
        assert!(html.contains(r#"<option value="None" selected>None</option>"#));
    }

    #[test]
    fn test_page_lists_field_errors() {
        use observation::{ObservationError, ValidationError};

        let err = ApiError::from(ObservationError::InvalidObservation(vec![
            ValidationError::MissingField("Month"),
            ValidationError::NotANumber {
                field: "MinTemp",
                raw: "<b>".to_string(),
            },
        ]));
        let html = page(&ObservationLimits::default(), &default_values(), None, Some(&err));
        assert!(html.contains("<li>Missing required field: Month</li>"));
        assert!(html.contains("<li>MinTemp is not a number: \"&lt;b&gt;\"</li>"));
        assert!(!html.contains("Prediction Complete!"));
    }
}
