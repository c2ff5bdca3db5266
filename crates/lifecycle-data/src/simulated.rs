//! Simulated market feed.

use lifecycle_core::error::DataSourceError;
use lifecycle_core::traits::MarketDataSource;
use lifecycle_core::types::{MarketSnapshot, Trend};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Market conditions reported by the simulated feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSettings {
    pub trend: Trend,
    pub volatility: f64,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            trend: Trend::Bull,
            volatility: 0.15,
        }
    }
}

/// Stand-in for a live market data API.
///
/// Every fetch returns a fresh snapshot stamped with the current time.
pub struct SimulatedMarketData {
    settings: MarketSettings,
}

impl SimulatedMarketData {
    pub const NAME: &'static str = "api";

    /// Create a new simulated feed.
    pub fn new(settings: MarketSettings) -> Result<Self, DataSourceError> {
        // Fail at construction rather than on first fetch.
        MarketSnapshot::now(settings.trend, settings.volatility)?;
        Ok(Self { settings })
    }
}

impl MarketDataSource for SimulatedMarketData {
    fn fetch(&self) -> Result<MarketSnapshot, DataSourceError> {
        let snapshot = MarketSnapshot::now(self.settings.trend, self.settings.volatility)?;
        debug!(
            "Simulated snapshot: trend={} volatility={}",
            snapshot.trend, snapshot.volatility
        );
        Ok(snapshot)
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
