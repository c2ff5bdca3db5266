//! Strategy implementer.
//!
//! Tracks live implementations through `active → monitored → completed`.
//! Completed implementations are terminal: they can be read but no longer
//! monitored.

use std::sync::Mutex;

use chrono::Utc;
use lifecycle_core::error::{LifecycleError, LifecycleResult};
use lifecycle_core::ids::IdSequence;
use lifecycle_core::sync::lock;
use lifecycle_core::traits::ExecutionMonitor;
use lifecycle_core::types::{
    ArchiveEntry, ArchiveStatus, Implementation, ImplementationResponse, MonitorReport, Strategy,
};
use tracing::{error, info, warn};

use crate::execution::SimulatedExecution;

struct ImplementationStore {
    ids: IdSequence,
    implementations: Vec<Implementation>,
}

impl ImplementationStore {
    fn active_mut(&mut self, implementation_id: &str) -> Option<&mut Implementation> {
        self.implementations
            .iter_mut()
            .find(|imp| imp.implementation_id == implementation_id && imp.is_active())
    }
}

/// Deploys validated strategies and tracks them until archival.
pub struct StrategyImplementer {
    monitor: Box<dyn ExecutionMonitor>,
    store: Mutex<ImplementationStore>,
    archive: Mutex<Vec<ArchiveEntry>>,
}

impl StrategyImplementer {
    /// Create an implementer backed by the given execution monitor.
    pub fn new(monitor: Box<dyn ExecutionMonitor>) -> Self {
        Self {
            monitor,
            store: Mutex::new(ImplementationStore {
                ids: IdSequence::new(IdSequence::IMPLEMENTATION),
                implementations: Vec::new(),
            }),
            archive: Mutex::new(Vec::new()),
        }
    }

    /// Deploy a strategy as a new active implementation.
    pub fn implement_strategy(&self, strategy: &Strategy) -> LifecycleResult<ImplementationResponse> {
        if let Err(e) = strategy.validate() {
            error!(
                "Implementation failed for strategy {}: {}",
                strategy.display_id(),
                e
            );
            return Err(e);
        }

        let mut store = lock(&self.store);
        let implementation_id = store.ids.next_id();
        let implementation = Implementation::new(implementation_id, &strategy.id, Utc::now());
        let response = ImplementationResponse::from(&implementation);
        store.implementations.push(implementation);
        drop(store);

        info!(
            "Implemented strategy {} as {}",
            strategy.id, response.implementation_id
        );
        Ok(response)
    }

    /// Sample performance for an active implementation.
    ///
    /// Repeated calls overwrite the stored performance of the same record.
    /// Unknown and completed implementations fail with
    /// [`LifecycleError::ImplementationNotFound`].
    pub fn monitor_strategy(&self, implementation_id: &str) -> LifecycleResult<MonitorReport> {
        if lock(&self.store).active_mut(implementation_id).is_none() {
            error!(
                "Monitoring failed for implementation {}: not found",
                implementation_id
            );
            return Err(LifecycleError::ImplementationNotFound(
                implementation_id.to_string(),
            ));
        }

        // The store lock is not held across the probe.
        let performance = self.monitor.sample(implementation_id).map_err(|source| {
            error!(
                "Monitoring failed for implementation {}: {}",
                implementation_id, source
            );
            LifecycleError::Monitoring {
                implementation_id: implementation_id.to_string(),
                source,
            }
        })?;

        let mut store = lock(&self.store);
        let Some(implementation) = store.active_mut(implementation_id) else {
            error!(
                "Monitoring failed for implementation {}: archived while sampling",
                implementation_id
            );
            return Err(LifecycleError::ImplementationNotFound(
                implementation_id.to_string(),
            ));
        };
        implementation.record_performance(performance.clone());

        info!("Monitored strategy {}", implementation.strategy_id);
        Ok(MonitorReport {
            implementation_id: implementation.implementation_id.clone(),
            status: implementation.status,
            performance,
        })
    }

    /// Archive a strategy's live run.
    ///
    /// Appends a `completed` entry to the archive and completes every active
    /// implementation of the strategy, stamping `end_time`. The archive is an
    /// append-only audit log, so repeated calls append repeated entries.
    /// Returns the number of implementations completed by this call.
    pub fn archive_strategy(&self, strategy_id: &str) -> usize {
        let mut store = lock(&self.store);
        let mut archive = lock(&self.archive);

        let entry = ArchiveEntry::new(strategy_id, ArchiveStatus::Completed);
        let completed = store
            .implementations
            .iter_mut()
            .filter(|imp| imp.strategy_id == strategy_id)
            .fold(0, |n, imp| n + usize::from(imp.complete(entry.archive_date)));
        archive.push(entry);

        if completed == 0 {
            warn!("Archived strategy {} with no active implementations", strategy_id);
        } else {
            info!(
                "Archived strategy {} ({} implementation(s) completed)",
                strategy_id, completed
            );
        }
        completed
    }

    /// Look up an implementation by id, whatever its status.
    pub fn get_implementation(&self, implementation_id: &str) -> Option<Implementation> {
        let found = lock(&self.store)
            .implementations
            .iter()
            .find(|imp| imp.implementation_id == implementation_id)
            .cloned();
        if found.is_none() {
            warn!("Implementation {} not found", implementation_id);
        }
        found
    }

    /// Every implementation, oldest first.
    pub fn list_implementations(&self) -> Vec<Implementation> {
        lock(&self.store).implementations.clone()
    }

    /// Implementations that are still active.
    pub fn active_implementations(&self) -> Vec<Implementation> {
        lock(&self.store)
            .implementations
            .iter()
            .filter(|imp| imp.is_active())
            .cloned()
            .collect()
    }

    /// Snapshot of the archive.
    pub fn archive(&self) -> Vec<ArchiveEntry> {
        lock(&self.archive).clone()
    }

    pub fn monitor_name(&self) -> &str {
        self.monitor.name()
    }
}

impl Default for StrategyImplementer {
    fn default() -> Self {
        Self::new(Box::new(SimulatedExecution::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecycle_core::error::MonitorError;
    use lifecycle_core::types::{
        Direction, ImplementationStatus, MarketSnapshot, OutcomeStatus, PerformanceMetrics, Trend,
    };
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct Unreachable;

    impl ExecutionMonitor for Unreachable {
        fn sample(&self, _implementation_id: &str) -> Result<PerformanceMetrics, MonitorError> {
            Err(MonitorError::Unreachable("venue down".to_string()))
        }

        fn name(&self) -> &str {
            "unreachable"
        }
    }

    /// Reports a growing execution time on every sample.
    struct Ticking(AtomicU64);

    impl ExecutionMonitor for Ticking {
        fn sample(&self, _implementation_id: &str) -> Result<PerformanceMetrics, MonitorError> {
            let tick = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(PerformanceMetrics {
                profit: dec!(0.1),
                drawdown: dec!(0.05),
                execution_time_secs: tick * 60,
            })
        }

        fn name(&self) -> &str {
            "ticking"
        }
    }

    fn strategy(id: &str) -> Strategy {
        Strategy {
            id: id.to_string(),
            direction: Direction::Long,
            entry_rule: "current_price".to_string(),
            exit_rule: "target_profit_20%".to_string(),
            risk_score: 0.7,
            market_conditions: MarketSnapshot::now(Trend::Bull, 0.15).unwrap(),
        }
    }

    #[test]
    fn test_implement_strategy() {
        let implementer = StrategyImplementer::default();
        let response = implementer.implement_strategy(&strategy("GAN_1")).unwrap();

        assert_eq!(response.status, OutcomeStatus::Success);
        assert_eq!(response.implementation_id, "IMP_1");
        assert_eq!(response.strategy_id, "GAN_1");
        assert!(response.end_time.is_none());

        let imp = implementer.get_implementation("IMP_1").unwrap();
        assert_eq!(imp.status, ImplementationStatus::Active);
        assert_eq!(imp.start_time, response.start_time);
        assert!(imp.performance.is_none());
    }

    #[test]
    fn test_implement_rejects_missing_id() {
        let implementer = StrategyImplementer::default();
        let result = implementer.implement_strategy(&strategy(""));

        assert!(matches!(result, Err(LifecycleError::InvalidStrategy(_))));
        assert!(implementer.list_implementations().is_empty());
    }

    #[test]
    fn test_monitor_unknown_implementation() {
        let implementer = StrategyImplementer::default();
        let result = implementer.monitor_strategy("IMP_7");

        assert!(matches!(
            result,
            Err(LifecycleError::ImplementationNotFound(id)) if id == "IMP_7"
        ));
    }

    #[test]
    fn test_monitor_updates_in_place() {
        let implementer = StrategyImplementer::new(Box::new(Ticking(AtomicU64::new(0))));
        implementer.implement_strategy(&strategy("GAN_1")).unwrap();

        let first = implementer.monitor_strategy("IMP_1").unwrap();
        let second = implementer.monitor_strategy("IMP_1").unwrap();

        assert_eq!(first.status, ImplementationStatus::Active);
        assert_eq!(first.performance.execution_time_secs, 60);
        assert_eq!(second.performance.execution_time_secs, 120);

        let all = implementer.list_implementations();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].performance.as_ref().unwrap().execution_time_secs, 120);
        assert!(all[0].is_active());
    }

    #[test]
    fn test_monitor_failure_leaves_record_untouched() {
        let implementer = StrategyImplementer::new(Box::new(Unreachable));
        implementer.implement_strategy(&strategy("GAN_1")).unwrap();

        let err = implementer.monitor_strategy("IMP_1").unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Monitoring { ref implementation_id, .. } if implementation_id == "IMP_1"
        ));
        assert!(implementer
            .get_implementation("IMP_1")
            .unwrap()
            .performance
            .is_none());
    }

    #[test]
    fn test_archive_completes_implementations() {
        let implementer = StrategyImplementer::default();
        implementer.implement_strategy(&strategy("GAN_1")).unwrap();
        implementer.implement_strategy(&strategy("GAN_2")).unwrap();
        implementer.implement_strategy(&strategy("GAN_1")).unwrap();

        assert_eq!(implementer.archive_strategy("GAN_1"), 2);

        for id in ["IMP_1", "IMP_3"] {
            let imp = implementer.get_implementation(id).unwrap();
            assert_eq!(imp.status, ImplementationStatus::Completed);
            assert!(imp.end_time.is_some());
        }
        let untouched = implementer.get_implementation("IMP_2").unwrap();
        assert!(untouched.is_active());
        assert!(untouched.end_time.is_none());
        assert_eq!(implementer.active_implementations().len(), 1);
    }

    #[test]
    fn test_completed_implementation_cannot_be_monitored() {
        let implementer = StrategyImplementer::default();
        implementer.implement_strategy(&strategy("GAN_1")).unwrap();
        implementer.monitor_strategy("IMP_1").unwrap();
        implementer.archive_strategy("GAN_1");

        assert!(matches!(
            implementer.monitor_strategy("IMP_1"),
            Err(LifecycleError::ImplementationNotFound(_))
        ));
        // Performance sampled before archival is kept.
        let imp = implementer.get_implementation("IMP_1").unwrap();
        assert!(imp.performance.is_some());
    }

    #[test]
    fn test_archive_twice_appends_two_entries() {
        let implementer = StrategyImplementer::default();
        implementer.implement_strategy(&strategy("GAN_1")).unwrap();

        assert_eq!(implementer.archive_strategy("GAN_1"), 1);
        let end_time = implementer.get_implementation("IMP_1").unwrap().end_time;
        assert_eq!(implementer.archive_strategy("GAN_1"), 0);

        let archive = implementer.archive();
        assert_eq!(archive.len(), 2);
        assert!(archive
            .iter()
            .all(|e| e.id == "GAN_1" && e.status == ArchiveStatus::Completed));
        assert_eq!(
            implementer.get_implementation("IMP_1").unwrap().end_time,
            end_time
        );
    }

    #[test]
    fn test_concurrent_implementation_keeps_ids_unique() {
        let implementer = std::sync::Arc::new(StrategyImplementer::default());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let implementer = std::sync::Arc::clone(&implementer);
                std::thread::spawn(move || {
                    let s = strategy(&format!("GAN_{}", t + 1));
                    (0..25)
                        .map(|_| implementer.implement_strategy(&s).unwrap().implementation_id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 100);
        assert_eq!(implementer.active_implementations().len(), 100);
        assert_eq!(implementer.archive_strategy("GAN_2"), 25);
    }

    #[test]
    fn test_archive_without_implementations() {
        let implementer = StrategyImplementer::default();
        assert_eq!(implementer.archive_strategy("GAN_9"), 0);
        assert_eq!(implementer.archive().len(), 1);
    }
}
