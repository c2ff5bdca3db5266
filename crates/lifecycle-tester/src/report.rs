//! Test report generation.

use lifecycle_core::types::TestResult;
use serde::{Deserialize, Serialize};

/// Printable report for a single backtest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    pub result: TestResult,
}

impl TestReport {
    pub fn new(result: TestResult) -> Self {
        Self { result }
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let r = &self.result;
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!(
            "  BACKTEST {:<12} strategy {}\n",
            r.test_id, r.strategy_id
        ));
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Profitability:       {:.2}%\n",
            r.metrics.profitability * rust_decimal::Decimal::ONE_HUNDRED
        ));
        s.push_str(&format!(
            "  Risk Score:          {:.2}\n",
            r.metrics.risk_score
        ));
        s.push_str(&format!(
            "  Success Rate:        {:.2}%\n",
            r.metrics.success_rate * 100.0
        ));
        s.push_str(&format!(
            "  Tested At:           {}\n",
            r.tested_at.to_rfc3339()
        ));
        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
