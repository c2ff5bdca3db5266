//! Execution monitoring trait.

use crate::error::MonitorError;
use crate::types::PerformanceMetrics;

/// Samples live performance of a deployed implementation.
pub trait ExecutionMonitor: Send + Sync {
    /// Sample current performance for an implementation.
    fn sample(&self, implementation_id: &str) -> Result<PerformanceMetrics, MonitorError>;

    /// Get the monitor name.
    fn name(&self) -> &str;
}
