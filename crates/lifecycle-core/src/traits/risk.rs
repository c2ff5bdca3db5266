//! Risk model trait.

use crate::types::MarketSnapshot;

/// Scores the risk of strategies generated under a market snapshot.
///
/// Scores are expected in `[0, 1]`; callers clamp whatever comes back.
pub trait RiskModel: Send + Sync {
    /// Assess risk for the given market conditions.
    fn assess(&self, market: &MarketSnapshot) -> f64;

    /// Get the model name.
    fn name(&self) -> &str;
}
