//! Market data source trait definitions.

use crate::error::DataSourceError;
use crate::types::MarketSnapshot;

/// Supplies market snapshots on demand.
///
/// Calls are synchronous; no retry or timeout policy is applied by the
/// lifecycle, so implementations that talk to a remote feed should bound
/// their own latency.
pub trait MarketDataSource: Send + Sync {
    /// Fetch the current market snapshot.
    fn fetch(&self) -> Result<MarketSnapshot, DataSourceError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
