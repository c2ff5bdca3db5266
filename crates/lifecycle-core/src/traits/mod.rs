//! Collaborator traits for the strategy lifecycle.

mod backtest;
mod data_source;
mod execution;
mod risk;

pub use backtest::BacktestEngine;
pub use data_source::MarketDataSource;
pub use execution::ExecutionMonitor;
pub use risk::RiskModel;
