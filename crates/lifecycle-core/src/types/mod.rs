//! Core record types for the strategy lifecycle.

mod archive;
mod implementation;
mod market;
mod strategy;
mod test_result;

pub use archive::{ArchiveEntry, ArchiveStatus};
pub use implementation::{
    Implementation, ImplementationResponse, ImplementationStatus, MonitorReport,
    PerformanceMetrics,
};
pub use market::{MarketSnapshot, Trend};
pub use strategy::{Direction, Strategy};
pub use test_result::{BacktestMetrics, OutcomeStatus, TestOutcome, TestResult};
