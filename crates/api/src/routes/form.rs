//! Form Routes
//!
//! The browser-facing page. Submissions always come back as the form, with
//! either the prediction or the reasons it could not be made.

use axum::{extract::State, http::StatusCode, response::Html, Form};
use observation::ObservationInput;
use std::sync::Arc;

use crate::render::{self, FormValues};
use crate::{ApiError, AppState};

/// Render the empty form with default values
pub async fn show_form(State(state): State<Arc<AppState>>) -> Html<String> {
    let limits = state.builder.validator().limits();
    Html(render::page(limits, &render::default_values(), None, None))
}

/// Predict from a form submission
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> (StatusCode, Html<String>) {
    let limits = state.builder.validator().limits();

    // Echo what was typed, blanks included, so the user can correct it
    let mut values: FormValues = render::default_values();
    values.extend(pairs.iter().cloned());

    let fields = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let outcome = ObservationInput::from_form(fields)
        .map_err(ApiError::from)
        .and_then(|input| state.predict(&input));

    match outcome {
        Ok(outcome) => (
            StatusCode::OK,
            Html(render::page(limits, &values, Some(&outcome), None)),
        ),
        Err(err) => (
            err.status(),
            Html(render::page(limits, &values, None, Some(&err))),
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::{create_router, test_support};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let app = create_router(test_support::state());
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn submit(body: &str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const FORM: &str = "MinTemp=13.4&MaxTemp=22.9&Rainfall=0.6&WindGustSpeed=44\
        &WindSpeed9am=20&WindSpeed3pm=24&Humidity9am=71&Humidity3pm=22\
        &Pressure9am=1007.7&Pressure3pm=1007.1&Cloud9am=8&Cloud3pm=5\
        &Temp9am=16.9&Temp3pm=21.8&RainToday=No&Month=12&WindGustDir=W";

    #[tokio::test]
    async fn test_show_form() {
        let (status, html) = send(Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Weather Prediction in Australia"));
        assert!(html.contains(r#"name="MinTemp" id="MinTemp" value="13.4""#));
        assert!(!html.contains("Prediction Complete!"));
    }

    #[tokio::test]
    async fn test_submit_shows_result() {
        let (status, html) = send(submit(FORM)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Prediction Complete!"));
        assert!(html.contains("Clear skies expected!"));
        assert!(html.contains(r#"<option value="W" selected>W</option>"#));
    }

    #[tokio::test]
    async fn test_submit_rain() {
        let body = FORM.replace("Humidity3pm=22", "Humidity3pm=90");
        let (status, html) = send(submit(&body)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Be prepared for some wet weather."));
    }

    #[tokio::test]
    async fn test_submit_invalid_keeps_form() {
        let body = FORM
            .replace("Humidity3pm=22", "Humidity3pm=abc")
            .replace("Pressure9am=1007.7", "Pressure9am=");
        let (status, html) = send(submit(&body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(html.contains("Please correct the highlighted values"));
        assert!(html.contains("Humidity3pm is not a number"));
        assert!(html.contains(r#"name="Humidity3pm" id="Humidity3pm" value="abc""#));
        assert!(html.contains(r#"name="Pressure9am" id="Pressure9am" value="""#));
        assert!(!html.contains("Prediction Complete!"));
    }
}
