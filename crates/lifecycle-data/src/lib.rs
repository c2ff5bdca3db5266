//! Market data sources for strategy generation.

mod simulated;
mod static_source;

pub use simulated::{MarketSettings, SimulatedMarketData};
pub use static_source::StaticMarketData;

use lifecycle_core::error::DataSourceError;
use lifecycle_core::traits::MarketDataSource;

/// Names accepted by [`create_source`].
pub const SOURCE_NAMES: &[&str] = &[SimulatedMarketData::NAME, StaticMarketData::NAME];

/// List the registered data source names.
pub fn available_sources() -> &'static [&'static str] {
    SOURCE_NAMES
}

/// Create a market data source by name.
pub fn create_source(
    name: &str,
    settings: &MarketSettings,
) -> Result<Box<dyn MarketDataSource>, DataSourceError> {
    match name {
        SimulatedMarketData::NAME => Ok(Box::new(SimulatedMarketData::new(settings.clone())?)),
        StaticMarketData::NAME => Ok(Box::new(StaticMarketData::from_settings(settings)?)),
        _ => Err(DataSourceError::Unsupported(name.to_string())),
    }
}
