//! Market snapshot types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataSourceError;

/// Prevailing market trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    #[default]
    Bull,
    Bear,
    Neutral,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bull => write!(f, "bull"),
            Trend::Bear => write!(f, "bear"),
            Trend::Neutral => write!(f, "neutral"),
        }
    }
}

impl std::str::FromStr for Trend {
    type Err = DataSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bull" => Ok(Trend::Bull),
            "bear" => Ok(Trend::Bear),
            "neutral" => Ok(Trend::Neutral),
            other => Err(DataSourceError::InvalidSnapshot(format!(
                "unknown trend '{}'",
                other
            ))),
        }
    }
}

/// Point-in-time view of the market used to generate strategies.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// Market trend
    pub trend: Trend,
    /// Volatility (non-negative)
    pub volatility: f64,
}

impl MarketSnapshot {
    /// Create a snapshot, rejecting negative or non-finite volatility.
    pub fn new(
        timestamp: DateTime<Utc>,
        trend: Trend,
        volatility: f64,
    ) -> Result<Self, DataSourceError> {
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(DataSourceError::InvalidSnapshot(format!(
                "volatility must be a non-negative number, got {}",
                volatility
            )));
        }

        Ok(Self {
            timestamp,
            trend,
            volatility,
        })
    }

    /// Create a snapshot stamped with the current time.
    pub fn now(trend: Trend, volatility: f64) -> Result<Self, DataSourceError> {
        Self::new(Utc::now(), trend, volatility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_rejects_negative_volatility() {
        assert!(MarketSnapshot::now(Trend::Bull, -0.1).is_err());
        assert!(MarketSnapshot::now(Trend::Bull, f64::NAN).is_err());
        assert!(MarketSnapshot::now(Trend::Bear, 0.0).is_ok());
    }

    #[test]
    fn test_trend_parse() {
        assert_eq!("Bull".parse::<Trend>().unwrap(), Trend::Bull);
        assert_eq!("neutral".parse::<Trend>().unwrap(), Trend::Neutral);
        assert!("sideways".parse::<Trend>().is_err());
    }

    #[test]
    fn test_trend_serializes_lowercase() {
        let json = serde_json::to_string(&Trend::Bear).unwrap();
        assert_eq!(json, "\"bear\"");
    }
}
