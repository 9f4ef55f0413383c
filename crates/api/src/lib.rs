//! Rain Prediction Server
//!
//! Web form and REST API in front of the rain tomorrow model.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use feature_engine::{FeatureVector, FeatureVectorBuilder};
use inference_engine::{InferenceEngine, InferenceResult};
use observation::{ObservationInput, Validator};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};

pub mod config;
pub mod error;
pub mod rate_limit;
mod render;
pub mod routes;

pub use config::{AppConfig, LogFormat, LogOutput, LoggingConfig};
pub use error::ApiError;

/// Request counters
#[derive(Debug, Default)]
pub struct PredictionStats {
    served: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
}

impl PredictionStats {
    pub fn snapshot(&self) -> SystemMetrics {
        SystemMetrics {
            predictions_served: self.served.load(Ordering::Relaxed),
            observations_rejected: self.rejected.load(Ordering::Relaxed),
            predictions_failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Application state shared across handlers
///
/// Built once at startup and never mutated apart from the counters.
pub struct AppState {
    /// Loaded model
    pub engine: InferenceEngine,
    /// Validation and encoding
    pub builder: FeatureVectorBuilder,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    pub stats: PredictionStats,
}

/// A successful prediction with the vector that produced it
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub features: FeatureVector,
    pub result: InferenceResult,
}

impl AppState {
    /// Create new application state around a loaded model
    pub fn new(engine: InferenceEngine, validator: Validator) -> Self {
        Self {
            engine,
            builder: FeatureVectorBuilder::new(validator),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            stats: PredictionStats::default(),
        }
    }

    /// Validate, encode and predict one observation
    pub fn predict(&self, input: &ObservationInput) -> Result<PredictionOutcome, ApiError> {
        let features = self.builder.build_input(input).map_err(|e| {
            self.stats.rejected.fetch_add(1, Ordering::Relaxed);
            info!("Rejected observation: {}", e);
            e
        })?;

        let result = self.engine.predict(&features).map_err(|e| {
            self.stats.failed.fetch_add(1, Ordering::Relaxed);
            warn!("Prediction failed: {}", e);
            e
        })?;

        self.stats.served.fetch_add(1, Ordering::Relaxed);
        info!(
            label = %result.prediction.label,
            latency_ms = result.latency_ms,
            "Prediction complete"
        );
        Ok(PredictionOutcome { features, result })
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelHealth,
    pub metrics: SystemMetrics,
}

/// Loaded model details
#[derive(Debug, Serialize)]
pub struct ModelHealth {
    pub backend: &'static str,
    pub path: String,
}

/// System metrics
#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    pub predictions_served: u64,
    pub observations_rejected: u64,
    pub predictions_failed: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::form::show_form).post(routes::form::submit_form))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/schema", get(routes::schema::get_schema))
        .route("/api/v1/predictions", post(routes::predictions::create_prediction))
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelHealth {
            backend: state.engine.backend(),
            path: state.engine.model_path().to_string(),
        },
        metrics: state.stats.snapshot(),
    })
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) {
    let level = config.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(config.output.make_writer());

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("Logging already initialised: {}", e);
    }
}

/// Run the server
pub async fn run_server(config: &AppConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let mut app = create_router(state).layer(TraceLayer::new_for_http());
    if let Some(governor) = rate_limit::create_governor_config(&config.rate_limit) {
        app = app.layer(GovernorLayer { config: governor });
    }

    info!("Starting API server on {}", config.server.addr);

    let listener = tokio::net::TcpListener::bind(&config.server.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use feature_engine::{Feature, FEATURE_DIMENSION};
    use inference_engine::LogisticPredictor;

    /// State with a model that predicts rain above 50% afternoon humidity
    pub fn state() -> Arc<AppState> {
        let mut weights = vec![0.0; FEATURE_DIMENSION];
        weights[Feature::Humidity3pm.index()] = 0.5;
        let model = LogisticPredictor::new(weights, -25.0, 0.5).unwrap();
        let engine = InferenceEngine::with_predictor("memory.json", Box::new(model));
        Arc::new(AppState::new(engine, Validator::default()))
    }
}
