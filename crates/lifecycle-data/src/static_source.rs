//! Fixed snapshot source for replay and testing.

use chrono::Utc;
use lifecycle_core::error::DataSourceError;
use lifecycle_core::traits::MarketDataSource;
use lifecycle_core::types::MarketSnapshot;

use crate::MarketSettings;

/// Returns the same snapshot on every fetch.
pub struct StaticMarketData {
    snapshot: MarketSnapshot,
}

impl StaticMarketData {
    pub const NAME: &'static str = "static";

    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self { snapshot }
    }

    /// Freeze a snapshot built from settings at the current time.
    pub fn from_settings(settings: &MarketSettings) -> Result<Self, DataSourceError> {
        let snapshot = MarketSnapshot::new(Utc::now(), settings.trend, settings.volatility)?;
        Ok(Self::new(snapshot))
    }
}

impl MarketDataSource for StaticMarketData {
    fn fetch(&self) -> Result<MarketSnapshot, DataSourceError> {
        Ok(self.snapshot.clone())
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecycle_core::types::Trend;

    #[test]
    fn test_static_returns_identical_snapshots() {
        let snapshot = MarketSnapshot::now(Trend::Neutral, 0.3).unwrap();
        let source = StaticMarketData::new(snapshot.clone());

        assert_eq!(source.fetch().unwrap(), snapshot);
        assert_eq!(source.fetch().unwrap(), snapshot);
    }
}
