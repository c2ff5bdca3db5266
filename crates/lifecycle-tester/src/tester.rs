//! Strategy tester.
//!
//! Runs backtests through a [`BacktestEngine`], stores every result under
//! its own test id, and keeps an append-only archive of tested strategies.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use lifecycle_core::error::{LifecycleError, LifecycleResult};
use lifecycle_core::ids::IdSequence;
use lifecycle_core::sync::lock;
use lifecycle_core::traits::BacktestEngine;
use lifecycle_core::types::{ArchiveEntry, ArchiveStatus, Strategy, TestOutcome, TestResult};
use tracing::{error, info, warn};

use crate::engine::SimulatedBacktest;

struct ResultStore {
    ids: IdSequence,
    results: HashMap<String, TestResult>,
    /// Test ids in the order they were assigned.
    order: Vec<String>,
}

/// Tests strategies and stores their results.
pub struct StrategyTester {
    engine: Box<dyn BacktestEngine>,
    store: Mutex<ResultStore>,
    archive: Mutex<Vec<ArchiveEntry>>,
}

impl StrategyTester {
    /// Create a tester backed by the given engine.
    pub fn new(engine: Box<dyn BacktestEngine>) -> Self {
        Self {
            engine,
            store: Mutex::new(ResultStore {
                ids: IdSequence::new(IdSequence::TEST),
                results: HashMap::new(),
                order: Vec::new(),
            }),
            archive: Mutex::new(Vec::new()),
        }
    }

    /// Backtest a strategy and store the result.
    ///
    /// Re-testing the same strategy is allowed; every run gets a new test id
    /// and all results are retained.
    pub fn test_strategy(&self, strategy: &Strategy) -> LifecycleResult<TestOutcome> {
        if let Err(e) = strategy.validate() {
            error!("Testing failed for strategy {}: {}", strategy.display_id(), e);
            return Err(e);
        }

        let metrics = self.engine.run(strategy).map_err(|source| {
            error!("Testing failed for strategy {}: {}", strategy.id, source);
            LifecycleError::Backtest {
                strategy_id: strategy.id.clone(),
                source,
            }
        })?;

        let mut store = lock(&self.store);
        let result = TestResult {
            test_id: store.ids.next_id(),
            strategy_id: strategy.id.clone(),
            metrics,
            tested_at: Utc::now(),
        };
        store.order.push(result.test_id.clone());
        store.results.insert(result.test_id.clone(), result.clone());
        drop(store);

        info!(
            "Strategy {} tested successfully as {}",
            result.strategy_id, result.test_id
        );
        Ok(TestOutcome::from(&result))
    }

    /// Record a strategy as tested.
    ///
    /// The archive is an append-only audit log: archiving the same id twice
    /// appends two entries.
    pub fn archive_strategy(&self, strategy_id: &str) -> ArchiveEntry {
        let entry = ArchiveEntry::new(strategy_id, ArchiveStatus::Tested);
        lock(&self.archive).push(entry.clone());
        info!("Archived strategy {}", strategy_id);
        entry
    }

    /// Look up a test result by test id.
    pub fn get_test_results(&self, test_id: &str) -> Option<TestResult> {
        let found = lock(&self.store).results.get(test_id).cloned();
        if found.is_none() {
            warn!("Test {} not found", test_id);
        }
        found
    }

    /// Every result for a strategy, in test order.
    pub fn results_for_strategy(&self, strategy_id: &str) -> Vec<TestResult> {
        let store = lock(&self.store);
        store
            .order
            .iter()
            .filter_map(|id| store.results.get(id))
            .filter(|r| r.strategy_id == strategy_id)
            .cloned()
            .collect()
    }

    /// Every stored result, in test order.
    pub fn list_results(&self) -> Vec<TestResult> {
        let store = lock(&self.store);
        store
            .order
            .iter()
            .filter_map(|id| store.results.get(id))
            .cloned()
            .collect()
    }

    /// Snapshot of the archive.
    pub fn archive(&self) -> Vec<ArchiveEntry> {
        lock(&self.archive).clone()
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }
}

impl Default for StrategyTester {
    fn default() -> Self {
        Self::new(Box::new(SimulatedBacktest::default()))
    }
}
