//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifecycle")]
#[command(author, version, about = "Generated trading strategy lifecycle")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", env = "LIFECYCLE_CONFIG")]
    pub config: PathBuf,

    /// Log level (overrides the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run strategies through generate, test, implement, monitor and archive
    Run(RunArgs),
    /// Generate strategies and list them
    Generate(GenerateArgs),
    /// List market data sources and risk models
    Sources,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Number of strategies to take through the lifecycle
    #[arg(short = 'n', long, default_value = "1")]
    pub cycles: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Number of strategies to generate
    #[arg(short = 'n', long, default_value = "3")]
    pub count: usize,

    /// Refresh market data before generating
    #[arg(long)]
    pub refresh: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from(["lifecycle", "--json-logs", "run", "-n", "3", "-o", "json"]);
        assert!(cli.json_logs);
        assert!(cli.log_level.is_none());
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.cycles, 3);
                assert!(args.output == OutputFormat::Json);
            }
            _ => panic!("expected run"),
        }
    }
}
