//! Generate strategies command.

use anyhow::{Context, Result};
use lifecycle_config::AppConfig;
use tracing::info;

use crate::cli::{GenerateArgs, OutputFormat};
use crate::pipeline::Pipeline;

pub fn run(args: GenerateArgs, config: &AppConfig) -> Result<()> {
    let pipeline = Pipeline::from_config(config).context("Failed to build pipeline")?;
    let generator = pipeline.generator();
    info!(
        "Generating {} strategies from knowledge base {}",
        args.count,
        generator.knowledge_base()
    );

    if args.refresh {
        generator
            .refresh_market_data()
            .context("Failed to refresh market data")?;
    }

    for _ in 0..args.count {
        pipeline.generate().context("Strategy generation failed")?;
    }

    let strategies = generator.list_strategies();
    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&strategies)?),
        OutputFormat::Text => {
            println!("{:<8} {:<6} {:<16} {:<20} {:>6}", "ID", "DIR", "ENTRY", "EXIT", "RISK");
            for s in &strategies {
                println!(
                    "{:<8} {:<6} {:<16} {:<20} {:>6.2}",
                    s.id, s.direction, s.entry_rule, s.exit_rule, s.risk_score
                );
            }
        }
    }

    Ok(())
}
