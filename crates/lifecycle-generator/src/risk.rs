//! Risk models for generated strategies.

use lifecycle_core::error::LifecycleError;
use lifecycle_core::traits::RiskModel;
use lifecycle_core::types::{MarketSnapshot, Trend};
use serde::{Deserialize, Serialize};

/// Names accepted by [`create_risk_model`].
pub const RISK_MODEL_NAMES: &[&str] = &[FixedRisk::NAME, VolatilityRisk::NAME];

/// Constant risk score regardless of market state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedRisk {
    pub score: f64,
}

impl FixedRisk {
    pub const NAME: &'static str = "fixed";

    pub fn new(score: f64) -> Self {
        Self { score }
    }
}

impl Default for FixedRisk {
    fn default() -> Self {
        Self { score: 0.7 }
    }
}

impl RiskModel for FixedRisk {
    fn assess(&self, _market: &MarketSnapshot) -> f64 {
        self.score
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

/// Risk that grows with volatility.
///
/// `score = base + volatility * scale (+ bear_penalty in bear markets)`,
/// clamped to `[0, 1]`. Non-decreasing in volatility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityRisk {
    pub base: f64,
    pub scale: f64,
    pub bear_penalty: f64,
}

impl VolatilityRisk {
    pub const NAME: &'static str = "volatility";
}

impl Default for VolatilityRisk {
    fn default() -> Self {
        Self {
            base: 0.4,
            scale: 2.0,
            bear_penalty: 0.1,
        }
    }
}

impl RiskModel for VolatilityRisk {
    fn assess(&self, market: &MarketSnapshot) -> f64 {
        let mut score = self.base + market.volatility * self.scale;
        if market.trend == Trend::Bear {
            score += self.bear_penalty;
        }
        score.clamp(0.0, 1.0)
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

/// Create a risk model by name.
pub fn create_risk_model(
    name: &str,
    fixed_score: f64,
) -> Result<Box<dyn RiskModel>, LifecycleError> {
    match name {
        FixedRisk::NAME => {
            if !(0.0..=1.0).contains(&fixed_score) {
                return Err(LifecycleError::Config(format!(
                    "fixed risk score must be within [0, 1], got {}",
                    fixed_score
                )));
            }
            Ok(Box::new(FixedRisk::new(fixed_score)))
        }
        VolatilityRisk::NAME => Ok(Box::new(VolatilityRisk::default())),
        _ => Err(LifecycleError::Config(format!("unknown risk model '{}'", name))),
    }
}
