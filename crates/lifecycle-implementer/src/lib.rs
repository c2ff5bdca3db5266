//! Live strategy implementations.

mod execution;
mod implementer;

pub use execution::{ExecutionSettings, SimulatedExecution};
pub use implementer::StrategyImplementer;
