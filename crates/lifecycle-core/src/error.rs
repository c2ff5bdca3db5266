//! Error types for the strategy lifecycle.

use thiserror::Error;

/// Top-level lifecycle error.
///
/// Lookup misses on read-only queries are returned as `None` by the stores;
/// the `*NotFound` variants are only raised when a miss blocks a mutation.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    #[error("Strategy not found: {0}")]
    StrategyNotFound(String),

    #[error("Test result not found: {0}")]
    TestResultNotFound(String),

    #[error("Implementation not found: {0}")]
    ImplementationNotFound(String),

    #[error("Backtest failed for strategy {strategy_id}: {source}")]
    Backtest {
        strategy_id: String,
        #[source]
        source: BacktestError,
    },

    #[error("Monitoring failed for implementation {implementation_id}: {source}")]
    Monitoring {
        implementation_id: String,
        #[source]
        source: MonitorError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Market data source errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataSourceError {
    #[error("Unsupported data source: {0}")]
    Unsupported(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid market snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Backtest collaborator errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BacktestError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Backtest engine error: {0}")]
    Engine(String),
}

/// Execution monitoring collaborator errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MonitorError {
    #[error("Execution venue unreachable: {0}")]
    Unreachable(String),

    #[error("Monitor error: {0}")]
    Probe(String),
}

/// Result type alias for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;
