//! Backtest engine trait.

use crate::error::BacktestError;
use crate::types::{BacktestMetrics, Strategy};

/// Evaluates a strategy against historical or synthetic data.
pub trait BacktestEngine: Send + Sync {
    /// Run a backtest for the given strategy.
    fn run(&self, strategy: &Strategy) -> Result<BacktestMetrics, BacktestError>;

    /// Get the engine name.
    fn name(&self) -> &str;
}
