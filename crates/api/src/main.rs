//! Raincast - Main Entry Point

mod cli;

use anyhow::Context;
use api::routes::predictions::PredictionResponse;
use api::{init_logging, run_server, AppConfig, AppState};
use clap::Parser;
use cli::{Cli, Command};
use feature_engine::FEATURE_NAMES;
use inference_engine::InferenceEngine;
use observation::{ObservationInput, Validator};
use std::sync::Arc;
use tracing::{error, info};

fn load_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let engine = InferenceEngine::load(&config.model.path).map_err(|e| {
        error!("Model could not be loaded: {}", e);
        e
    })?;
    info!(
        path = %config.model.path.display(),
        backend = engine.backend(),
        "Model loaded"
    );
    Ok(AppState::new(engine, Validator::new(config.limits.clone())))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(model) = cli.model {
        config.model.path = model;
    }
    init_logging(&config.logging);

    match cli.cmd {
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                config.server.addr = addr;
            }
            info!("=== Raincast v{} ===", env!("CARGO_PKG_VERSION"));
            let state = Arc::new(load_state(&config)?);
            run_server(&config, state).await?;
        }
        Command::Predict { input } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let observation: ObservationInput = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse {}", input.display()))?;

            let state = load_state(&config)?;
            let outcome = state.predict(&observation)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&PredictionResponse::from(&outcome))?
            );
        }
        Command::Schema => {
            for (index, name) in FEATURE_NAMES.iter().enumerate() {
                println!("{:>2}  {}", index, name);
            }
        }
    }

    Ok(())
}
