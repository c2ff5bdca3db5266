//! Backtest result records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status carried by successful result envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    #[default]
    Success,
}

/// Metrics produced by a backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestMetrics {
    /// Return over the test window (fraction)
    pub profitability: Decimal,
    /// Risk score in [0, 1]
    pub risk_score: f64,
    /// Fraction of winning trades
    pub success_rate: f64,
}

/// A stored backtest result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Tester-assigned id (`TEST_<n>`)
    pub test_id: String,
    /// Strategy that was tested
    pub strategy_id: String,
    /// Backtest metrics
    pub metrics: BacktestMetrics,
    /// When the test ran
    pub tested_at: DateTime<Utc>,
}

/// Envelope returned from a test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub status: OutcomeStatus,
    pub test_id: String,
    pub strategy_id: String,
    pub results: BacktestMetrics,
}

impl From<&TestResult> for TestOutcome {
    fn from(result: &TestResult) -> Self {
        Self {
            status: OutcomeStatus::Success,
            test_id: result.test_id.clone(),
            strategy_id: result.strategy_id.clone(),
            results: result.metrics.clone(),
        }
    }
}
