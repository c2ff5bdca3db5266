//! Strategy generation.
//!
//! This crate provides:
//! - The strategy generator and its strategy cache
//! - Pluggable risk models used to score generated strategies

mod generator;
mod risk;

pub use generator::{GeneratorConfig, StrategyGenerator, StrategyTemplate};
pub use risk::{create_risk_model, FixedRisk, VolatilityRisk, RISK_MODEL_NAMES};
