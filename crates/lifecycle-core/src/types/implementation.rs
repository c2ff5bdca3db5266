//! Live implementation records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::OutcomeStatus;

/// Implementation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImplementationStatus {
    /// Deployed and accepting monitoring updates
    Active,
    /// Archived; terminal
    Completed,
}

impl ImplementationStatus {
    /// Check if the implementation is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ImplementationStatus::Completed)
    }
}

impl std::fmt::Display for ImplementationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImplementationStatus::Active => write!(f, "active"),
            ImplementationStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Performance sampled from the execution venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Realized profit (fraction)
    pub profit: Decimal,
    /// Drawdown (fraction)
    pub drawdown: Decimal,
    /// Time spent executing, in seconds
    pub execution_time_secs: u64,
}

/// A live deployment of a strategy.
///
/// `end_time` is set if and only if `status` is `Completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Implementation {
    /// Implementer-assigned id (`IMP_<n>`)
    pub implementation_id: String,
    /// Strategy being run
    pub strategy_id: String,
    pub status: ImplementationStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Latest sampled performance, absent until monitored
    pub performance: Option<PerformanceMetrics>,
}

impl Implementation {
    /// Create a new active implementation.
    pub fn new(
        implementation_id: impl Into<String>,
        strategy_id: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            implementation_id: implementation_id.into(),
            strategy_id: strategy_id.into(),
            status: ImplementationStatus::Active,
            start_time,
            end_time: None,
            performance: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ImplementationStatus::Active
    }

    /// Replace the sampled performance.
    pub fn record_performance(&mut self, performance: PerformanceMetrics) {
        self.performance = Some(performance);
    }

    /// Transition to `Completed`, stamping `end_time`.
    ///
    /// Returns `false` if the implementation was already completed; the
    /// first `end_time` is kept in that case.
    pub fn complete(&mut self, at: DateTime<Utc>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = ImplementationStatus::Completed;
        self.end_time = Some(at);
        true
    }
}

/// Envelope returned when a strategy is implemented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationResponse {
    pub status: OutcomeStatus,
    pub implementation_id: String,
    pub strategy_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl From<&Implementation> for ImplementationResponse {
    fn from(imp: &Implementation) -> Self {
        Self {
            status: OutcomeStatus::Success,
            implementation_id: imp.implementation_id.clone(),
            strategy_id: imp.strategy_id.clone(),
            start_time: imp.start_time,
            end_time: imp.end_time,
        }
    }
}

/// Envelope returned from a monitoring probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorReport {
    pub implementation_id: String,
    pub status: ImplementationStatus,
    pub performance: PerformanceMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_implementation_is_active() {
        let imp = Implementation::new("IMP_1", "GAN_1", Utc::now());
        assert!(imp.is_active());
        assert!(imp.end_time.is_none());
        assert!(imp.performance.is_none());
    }

    #[test]
    fn test_complete_stamps_end_time_once() {
        let mut imp = Implementation::new("IMP_1", "GAN_1", Utc::now());
        let first = Utc::now();

        assert!(imp.complete(first));
        assert_eq!(imp.status, ImplementationStatus::Completed);
        assert_eq!(imp.end_time, Some(first));

        let later = first + chrono::Duration::seconds(30);
        assert!(!imp.complete(later));
        assert_eq!(imp.end_time, Some(first));
    }

    #[test]
    fn test_record_performance_overwrites() {
        let mut imp = Implementation::new("IMP_1", "GAN_1", Utc::now());
        imp.record_performance(PerformanceMetrics {
            profit: dec!(0.1),
            drawdown: dec!(0.05),
            execution_time_secs: 120,
        });
        imp.record_performance(PerformanceMetrics {
            profit: dec!(0.2),
            drawdown: dec!(0.01),
            execution_time_secs: 240,
        });

        let perf = imp.performance.unwrap();
        assert_eq!(perf.profit, dec!(0.2));
        assert_eq!(perf.execution_time_secs, 240);
    }

    #[test]
    fn test_response_serializes_null_end_time() {
        let imp = Implementation::new("IMP_1", "GAN_1", Utc::now());
        let json = serde_json::to_value(ImplementationResponse::from(&imp)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["implementation_id"], "IMP_1");
        assert!(json["end_time"].is_null());
    }
}
