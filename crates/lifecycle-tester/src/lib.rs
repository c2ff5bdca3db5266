//! Strategy backtesting.

mod engine;
mod report;
mod tester;

pub use engine::{BacktestSettings, SimulatedBacktest};
pub use report::TestReport;
pub use tester::StrategyTester;
