//! Sequential identifiers.

/// Monotonic id sequence producing `<PREFIX>_1`, `<PREFIX>_2`, ...
///
/// Values are never reused for the lifetime of the sequence.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: &'static str,
    last: u64,
}

impl IdSequence {
    /// Prefix for generated strategies.
    pub const STRATEGY: &'static str = "GAN";
    /// Prefix for backtest runs.
    pub const TEST: &'static str = "TEST";
    /// Prefix for live implementations.
    pub const IMPLEMENTATION: &'static str = "IMP";

    /// Create a new sequence with the given prefix.
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix, last: 0 }
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> String {
        self.last += 1;
        format!("{}_{}", self.prefix, self.last)
    }

    /// Number of ids allocated so far.
    pub fn issued(&self) -> u64 {
        self.last
    }

    /// Prefix stamped on every id.
    pub fn prefix(&self) -> &str {
        self.prefix
    }
}
