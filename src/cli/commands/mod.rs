//! CLI command implementations.

pub mod generate;
pub mod run;
pub mod sources;
pub mod validate;
