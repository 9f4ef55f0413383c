use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Predict whether it will rain tomorrow in Australia.")]
pub struct Cli {
    /// Configuration file (defaults to ./raincast.toml when present)
    #[arg(env = "RAINCAST_CONFIG", short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Model artifact, overriding the configured path
    #[arg(env = "RAINCAST_MODEL", short, long, global = true)]
    pub model: Option<PathBuf>,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the web form and REST API
    Serve {
        /// Listen address, overriding the configured one
        #[arg(long)]
        addr: Option<String>,
    },
    /// Predict once from a JSON observation file
    Predict {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print the model's input columns
    Schema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_predict() {
        let cli = Cli::try_parse_from([
            "raincast",
            "--model",
            "model.json",
            "predict",
            "--input",
            "obs.json",
        ])
        .unwrap();
        assert_eq!(cli.model, Some(PathBuf::from("model.json")));
        match cli.cmd {
            Command::Predict { input } => assert_eq!(input, PathBuf::from("obs.json")),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
