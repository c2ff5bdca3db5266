//! List data sources and risk models command.

use anyhow::Result;
use lifecycle_data::available_sources;
use lifecycle_generator::RISK_MODEL_NAMES;

pub fn run() -> Result<()> {
    println!("Market Data Sources");
    println!("═══════════════════════════════════════════════════════════");
    for name in available_sources() {
        println!("  {}", name);
    }
    println!();

    println!("Risk Models");
    println!("═══════════════════════════════════════════════════════════");
    for name in RISK_MODEL_NAMES {
        println!("  {}", name);
    }
    println!();
    println!("Select them with generator.data_source and generator.risk_model.");

    Ok(())
}
