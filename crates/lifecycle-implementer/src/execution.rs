//! Simulated execution monitor.

use lifecycle_core::error::MonitorError;
use lifecycle_core::traits::ExecutionMonitor;
use lifecycle_core::types::PerformanceMetrics;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Performance reported by the simulated monitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSettings {
    pub profit: Decimal,
    pub drawdown: Decimal,
    pub execution_time_secs: u64,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            profit: dec!(0.1),
            drawdown: dec!(0.05),
            execution_time_secs: 120,
        }
    }
}

/// Execution monitor that reports fixed performance.
#[derive(Debug, Clone, Default)]
pub struct SimulatedExecution {
    settings: ExecutionSettings,
}

impl SimulatedExecution {
    pub fn new(settings: ExecutionSettings) -> Self {
        Self { settings }
    }
}

impl ExecutionMonitor for SimulatedExecution {
    fn sample(&self, _implementation_id: &str) -> Result<PerformanceMetrics, MonitorError> {
        Ok(PerformanceMetrics {
            profit: self.settings.profit,
            drawdown: self.settings.drawdown,
            execution_time_secs: self.settings.execution_time_secs,
        })
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
