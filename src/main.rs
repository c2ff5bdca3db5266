//! Strategy lifecycle CLI application.

mod cli;
mod pipeline;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use lifecycle_config::{load_config_or_default, LoggingConfig};
use lifecycle_monitor::{setup_logging, LogFormat};
use std::path::Path;
use tracing::warn;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; the
    // command itself reports any config error.
    let config = load_config_or_default(&cli.config);
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(|_| LoggingConfig::default());

    let level = cli
        .log_level
        .as_ref()
        .map(|l| l.as_str().to_string())
        .unwrap_or(logging.level);
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::from_name(&logging.format)
    };
    let _log_guard = setup_logging(&level, format, logging.file.as_deref().map(Path::new))
        .context("Failed to initialize logging")?;

    if !cli.config.exists() && !matches!(cli.command, Commands::ValidateConfig) {
        warn!(
            "Config file {:?} not found, using defaults and environment",
            cli.config
        );
    }

    match cli.command {
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
        Commands::Sources => cli::commands::sources::run(),
        Commands::Run(args) => {
            let config = config.context("Failed to load configuration")?;
            cli::commands::run::run(args, &config)
        }
        Commands::Generate(args) => {
            let config = config.context("Failed to load configuration")?;
            cli::commands::generate::run(args, &config)
        }
    }
}
