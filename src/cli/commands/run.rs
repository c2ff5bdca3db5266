//! Full lifecycle command.

use anyhow::{Context, Result};
use lifecycle_config::AppConfig;
use tracing::info;

use crate::cli::{OutputFormat, RunArgs};
use crate::pipeline::Pipeline;

pub fn run(args: RunArgs, config: &AppConfig) -> Result<()> {
    info!("Running {} lifecycle cycle(s)", args.cycles);

    let pipeline = Pipeline::from_config(config).context("Failed to build pipeline")?;
    let mut summaries = Vec::with_capacity(args.cycles);
    for cycle in 1..=args.cycles {
        let summary = pipeline
            .run_cycle()
            .with_context(|| format!("Lifecycle cycle {} failed", cycle))?;
        summaries.push(summary);
    }

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Text => {
            println!("Strategy Lifecycle");
            println!("═══════════════════════════════════════════════════════════");
            for summary in &summaries {
                print!("{}", summary.summary());
            }
            println!("───────────────────────────────────────────────────────────");
            println!(
                "Strategies: {}  Tests: {}  Implementations: {}  Archived: {}",
                pipeline.generator().len(),
                pipeline.tester().list_results().len(),
                pipeline.implementer().list_implementations().len(),
                pipeline.implementer().archive().len(),
            );
        }
    }

    Ok(())
}
