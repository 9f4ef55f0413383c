//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `RAINCAST__SECTION__KEY` environment variables.

use crate::rate_limit::RateLimitConfig;
use observation::ObservationLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "raincast.toml";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Model artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the `.onnx` or `.json` artifact
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("rain_model.onnx"),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Stream log lines are written to
///
/// Defaults to stderr so `raincast predict` keeps stdout for its JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stderr,
    Stdout,
}

impl LogOutput {
    pub fn make_writer(self) -> BoxMakeWriter {
        match self {
            LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
            LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            output: LogOutput::Stderr,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
    /// Accepted ranges for form values
    pub limits: ObservationLimits,
}

impl AppConfig {
    /// Load configuration
    ///
    /// An explicit `path` must exist; otherwise [`DEFAULT_CONFIG_FILE`] is
    /// read when present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let app: Self = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("RAINCAST").separator("__"))
            .build()?
            .try_deserialize()?;

        app.limits
            .check()
            .map_err(|e| config::ConfigError::Message(format!("limits.{}", e)))?;
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.model.path, PathBuf::from("rain_model.onnx"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.output, LogOutput::Stderr);
        assert_eq!(config.limits.humidity_range, (0.0, 100.0));
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
addr = "127.0.0.1:9000"

[model]
path = "models/rain.json"

[logging]
format = "json"
output = "stdout"

[limits]
temperature_range = [-10.0, 45.0]
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.addr, "127.0.0.1:9000");
        assert_eq!(config.model.path, PathBuf::from("models/rain.json"));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.output, LogOutput::Stdout);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.limits.temperature_range, (-10.0, 45.0));
        assert_eq!(config.limits.cloud_range, (0.0, 9.0));
        assert_eq!(config.rate_limit.burst_size, RateLimitConfig::default().burst_size);
    }

    #[test]
    fn test_inverted_limits_are_a_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[limits]\nhumidity_range = [100.0, 0.0]").unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("limits.humidity_range"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/raincast.toml"))).is_err());
    }
}
