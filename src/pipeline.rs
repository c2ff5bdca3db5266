//! Lifecycle orchestration.
//!
//! Wires the generator, tester and implementer together and enforces that a
//! strategy exists before anything referencing it is created.

use lifecycle_config::AppConfig;
use lifecycle_core::error::{LifecycleError, LifecycleResult};
use lifecycle_core::types::{
    ArchiveEntry, Implementation, ImplementationResponse, MonitorReport, Strategy, TestOutcome,
};
use lifecycle_generator::{create_risk_model, StrategyGenerator};
use lifecycle_implementer::{SimulatedExecution, StrategyImplementer};
use lifecycle_tester::{SimulatedBacktest, StrategyTester};
use serde::Serialize;
use tracing::info;

/// Result of retiring a strategy from both stores.
#[derive(Debug, Clone, Serialize)]
pub struct Retirement {
    /// Entry appended to the tester's archive
    pub tested: ArchiveEntry,
    /// Implementations completed by the implementer
    pub completed: usize,
}

/// Records produced by one full generate → archive cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleSummary {
    pub strategy: Strategy,
    pub test: TestOutcome,
    pub implementation: ImplementationResponse,
    pub monitor: MonitorReport,
    /// Implementation state after archival
    pub archived: Implementation,
}

impl CycleSummary {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            "{}  {} entry={} exit={} risk={:.2} (market {} vol {:.2})\n",
            self.strategy.id,
            self.strategy.direction,
            self.strategy.entry_rule,
            self.strategy.exit_rule,
            self.strategy.risk_score,
            self.strategy.market_conditions.trend,
            self.strategy.market_conditions.volatility,
        ));
        s.push_str(&format!(
            "  {}  profitability={} risk={:.2} success={:.2}\n",
            self.test.test_id,
            self.test.results.profitability,
            self.test.results.risk_score,
            self.test.results.success_rate,
        ));
        s.push_str(&format!(
            "  {}  started {}\n",
            self.implementation.implementation_id,
            self.implementation.start_time.to_rfc3339(),
        ));
        s.push_str(&format!(
            "    monitored: profit={} drawdown={} execution={}s\n",
            self.monitor.performance.profit,
            self.monitor.performance.drawdown,
            self.monitor.performance.execution_time_secs,
        ));
        s.push_str(&format!("    status: {}", self.archived.status));
        if let Some(end) = self.archived.end_time {
            s.push_str(&format!(" (ended {})", end.to_rfc3339()));
        }
        s.push('\n');
        s
    }
}

/// Generator → tester → implementer pipeline.
pub struct Pipeline {
    generator: StrategyGenerator,
    tester: StrategyTester,
    implementer: StrategyImplementer,
}

impl Pipeline {
    pub fn new(
        generator: StrategyGenerator,
        tester: StrategyTester,
        implementer: StrategyImplementer,
    ) -> Self {
        Self {
            generator,
            tester,
            implementer,
        }
    }

    /// Build a pipeline with the simulated collaborators described by `config`.
    pub fn from_config(config: &AppConfig) -> LifecycleResult<Self> {
        let risk_model =
            create_risk_model(&config.generator.risk_model, config.generator.fixed_risk)?;
        let generator =
            StrategyGenerator::new(config.generator_config()).with_risk_model(risk_model);

        let engine = SimulatedBacktest::new(config.backtest.clone())
            .map_err(|e| LifecycleError::Config(e.to_string()))?;
        let tester = StrategyTester::new(Box::new(engine));

        let implementer =
            StrategyImplementer::new(Box::new(SimulatedExecution::new(config.execution.clone())));

        Ok(Self::new(generator, tester, implementer))
    }

    pub fn generator(&self) -> &StrategyGenerator {
        &self.generator
    }

    pub fn tester(&self) -> &StrategyTester {
        &self.tester
    }

    pub fn implementer(&self) -> &StrategyImplementer {
        &self.implementer
    }

    /// Generate a new strategy.
    pub fn generate(&self) -> LifecycleResult<Strategy> {
        self.generator.generate_strategy()
    }

    /// Backtest a generated strategy.
    pub fn test(&self, strategy_id: &str) -> LifecycleResult<TestOutcome> {
        let strategy = self.require_strategy(strategy_id)?;
        self.tester.test_strategy(&strategy)
    }

    /// Deploy the strategy behind a stored test result.
    pub fn promote(&self, test_id: &str) -> LifecycleResult<ImplementationResponse> {
        let result = self
            .tester
            .get_test_results(test_id)
            .ok_or_else(|| LifecycleError::TestResultNotFound(test_id.to_string()))?;
        let strategy = self.require_strategy(&result.strategy_id)?;
        self.implementer.implement_strategy(&strategy)
    }

    /// Sample performance for an active implementation.
    pub fn monitor(&self, implementation_id: &str) -> LifecycleResult<MonitorReport> {
        self.implementer.monitor_strategy(implementation_id)
    }

    /// Archive a strategy in the tester and complete its implementations.
    pub fn retire(&self, strategy_id: &str) -> LifecycleResult<Retirement> {
        self.require_strategy(strategy_id)?;
        let tested = self.tester.archive_strategy(strategy_id);
        let completed = self.implementer.archive_strategy(strategy_id);
        Ok(Retirement { tested, completed })
    }

    /// Run one strategy through every stage.
    pub fn run_cycle(&self) -> LifecycleResult<CycleSummary> {
        let strategy = self.generate()?;
        let test = self.test(&strategy.id)?;
        let implementation = self.promote(&test.test_id)?;
        let monitor = self.monitor(&implementation.implementation_id)?;
        self.retire(&strategy.id)?;

        let archived = self
            .implementer
            .get_implementation(&implementation.implementation_id)
            .ok_or_else(|| {
                LifecycleError::ImplementationNotFound(implementation.implementation_id.clone())
            })?;

        info!("Completed lifecycle for strategy {}", strategy.id);
        Ok(CycleSummary {
            strategy,
            test,
            implementation,
            monitor,
            archived,
        })
    }

    fn require_strategy(&self, strategy_id: &str) -> LifecycleResult<Strategy> {
        self.generator
            .get_strategy(strategy_id)
            .ok_or_else(|| LifecycleError::StrategyNotFound(strategy_id.to_string()))
    }
}
