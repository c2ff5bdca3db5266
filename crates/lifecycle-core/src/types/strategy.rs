//! Generated strategy records.

use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;
use crate::types::MarketSnapshot;

/// Trade direction of a generated strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

/// A generated trading rule set.
///
/// Created by the generator and never mutated afterwards; later stages
/// attach their own records keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Generator-assigned id (`GAN_<n>`)
    pub id: String,
    /// Long or short
    pub direction: Direction,
    /// Entry condition
    pub entry_rule: String,
    /// Exit condition
    pub exit_rule: String,
    /// Risk score in [0, 1]
    pub risk_score: f64,
    /// Market conditions the strategy was generated under
    pub market_conditions: MarketSnapshot,
}

impl Strategy {
    /// Check that the record carries every field downstream stages rely on.
    pub fn validate(&self) -> Result<(), LifecycleError> {
        if self.id.trim().is_empty() {
            return Err(LifecycleError::InvalidStrategy(
                "strategy record has no id".to_string(),
            ));
        }

        if self.entry_rule.trim().is_empty() || self.exit_rule.trim().is_empty() {
            return Err(LifecycleError::InvalidStrategy(format!(
                "strategy {} is missing an entry or exit rule",
                self.id
            )));
        }

        if !self.risk_score.is_finite() || !(0.0..=1.0).contains(&self.risk_score) {
            return Err(LifecycleError::InvalidStrategy(format!(
                "strategy {} has risk score {} outside [0, 1]",
                self.id, self.risk_score
            )));
        }

        Ok(())
    }

    /// Id for log messages, `unknown` when the record has none.
    pub fn display_id(&self) -> &str {
        if self.id.trim().is_empty() {
            "unknown"
        } else {
            &self.id
        }
    }
}
