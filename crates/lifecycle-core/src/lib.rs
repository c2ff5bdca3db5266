//! Core types and traits for the strategy lifecycle.
//!
//! This crate provides the foundational building blocks including:
//! - Market snapshots and generated strategy records
//! - Backtest results, live implementations and archive entries
//! - Collaborator traits for market data, backtesting, execution monitoring and risk
//! - Sequential id generation for every store

pub mod error;
pub mod ids;
pub mod sync;
pub mod traits;
pub mod types;

pub use error::{LifecycleError, LifecycleResult};
pub use ids::IdSequence;
pub use traits::*;
pub use types::*;
