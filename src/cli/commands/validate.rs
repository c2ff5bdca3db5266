//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use lifecycle_config::load_config;

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Knowledge base: {}", config.generator.knowledge_base);
            println!("Data source: {}", config.generator.data_source);
            println!("Risk model: {}", config.generator.risk_model);
            println!(
                "Market: {} (volatility {})",
                config.market.trend, config.market.volatility
            );
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
