//! Simulated backtest engine.

use lifecycle_core::error::BacktestError;
use lifecycle_core::traits::BacktestEngine;
use lifecycle_core::types::{BacktestMetrics, Strategy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Metrics reported by the simulated engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    /// Return over the test window
    pub profitability: Decimal,
    /// Risk score in [0, 1]
    pub risk_score: f64,
    /// Fraction of winning trades
    pub success_rate: f64,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            profitability: dec!(0.15),
            risk_score: 0.7,
            success_rate: 0.85,
        }
    }
}

impl BacktestSettings {
    /// Check the ratios are in range.
    pub fn validate(&self) -> Result<(), BacktestError> {
        if !(0.0..=1.0).contains(&self.risk_score) {
            return Err(BacktestError::Engine(format!(
                "risk score must be within [0, 1], got {}",
                self.risk_score
            )));
        }
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(BacktestError::Engine(format!(
                "success rate must be within [0, 1], got {}",
                self.success_rate
            )));
        }
        Ok(())
    }
}

/// Backtest engine that reports fixed metrics for every strategy.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBacktest {
    settings: BacktestSettings,
}

impl SimulatedBacktest {
    /// Create a new simulated engine.
    pub fn new(settings: BacktestSettings) -> Result<Self, BacktestError> {
        settings.validate()?;
        Ok(Self { settings })
    }
}

impl BacktestEngine for SimulatedBacktest {
    fn run(&self, strategy: &Strategy) -> Result<BacktestMetrics, BacktestError> {
        debug!("Simulating backtest for {}", strategy.id);
        Ok(BacktestMetrics {
            profitability: self.settings.profitability,
            risk_score: self.settings.risk_score,
            success_rate: self.settings.success_rate,
        })
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
