//! Strategy generator.
//!
//! Produces strategy records from a cached market snapshot and a risk
//! score, and keeps the authoritative strategy cache.

use std::sync::Mutex;

use lifecycle_core::error::{DataSourceError, LifecycleResult};
use lifecycle_core::ids::IdSequence;
use lifecycle_core::sync::lock;
use lifecycle_core::traits::{MarketDataSource, RiskModel};
use lifecycle_core::types::{Direction, MarketSnapshot, Strategy};
use lifecycle_data::MarketSettings;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::risk::FixedRisk;

/// Generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Knowledge base the generator draws on
    pub knowledge_base: String,
    /// Name of the market data source
    pub data_source: String,
    /// Settings passed to the market data source
    pub market: MarketSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            knowledge_base: "local".to_string(),
            data_source: "api".to_string(),
            market: MarketSettings::default(),
        }
    }
}

/// Rule set stamped onto every generated strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyTemplate {
    pub direction: Direction,
    pub entry_rule: String,
    pub exit_rule: String,
}

impl Default for StrategyTemplate {
    fn default() -> Self {
        Self {
            direction: Direction::Long,
            entry_rule: "current_price".to_string(),
            exit_rule: "target_profit_20%".to_string(),
        }
    }
}

/// Strategy cache plus the sequence its ids come from.
struct StrategyCache {
    ids: IdSequence,
    strategies: Vec<Strategy>,
}

/// Generates strategies and owns the strategy cache.
pub struct StrategyGenerator {
    config: GeneratorConfig,
    template: StrategyTemplate,
    /// Resolved once at construction; an unknown name is kept as the error
    /// every fetch reports.
    source: Result<Box<dyn MarketDataSource>, DataSourceError>,
    risk_model: Box<dyn RiskModel>,
    market_data: Mutex<Option<MarketSnapshot>>,
    cache: Mutex<StrategyCache>,
}

impl StrategyGenerator {
    /// Create a generator that resolves its data source by name.
    pub fn new(config: GeneratorConfig) -> Self {
        let source = lifecycle_data::create_source(&config.data_source, &config.market);
        Self {
            config,
            template: StrategyTemplate::default(),
            source,
            risk_model: Box::new(FixedRisk::default()),
            market_data: Mutex::new(None),
            cache: Mutex::new(StrategyCache {
                ids: IdSequence::new(IdSequence::STRATEGY),
                strategies: Vec::new(),
            }),
        }
    }

    /// Use an explicit market data source instead of the configured name.
    pub fn with_source(mut self, source: Box<dyn MarketDataSource>) -> Self {
        self.source = Ok(source);
        self
    }

    /// Set the risk model.
    pub fn with_risk_model(mut self, risk_model: Box<dyn RiskModel>) -> Self {
        self.risk_model = risk_model;
        self
    }

    /// Set the rule template.
    pub fn with_template(mut self, template: StrategyTemplate) -> Self {
        self.template = template;
        self
    }

    /// Knowledge base the generator draws on.
    pub fn knowledge_base(&self) -> &str {
        &self.config.knowledge_base
    }

    /// Name of the market data source in use.
    pub fn data_source(&self) -> &str {
        match &self.source {
            Ok(source) => source.name(),
            Err(_) => self.config.data_source.as_str(),
        }
    }

    /// Fetch a fresh market snapshot.
    ///
    /// Nothing is cached here; see [`Self::refresh_market_data`].
    pub fn fetch_market_data(&self) -> Result<MarketSnapshot, DataSourceError> {
        let result = match &self.source {
            Ok(source) => source.fetch(),
            Err(e) => Err(e.clone()),
        };

        match &result {
            Ok(_) => info!("Market data fetched successfully from {}", self.data_source()),
            Err(e) => error!("Failed to fetch market data: {}", e),
        }
        result
    }

    /// Fetch a snapshot and replace the cached one.
    pub fn refresh_market_data(&self) -> Result<MarketSnapshot, DataSourceError> {
        let snapshot = self.fetch_market_data()?;
        *lock(&self.market_data) = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// The cached market snapshot, if one has been fetched.
    pub fn market_data(&self) -> Option<MarketSnapshot> {
        lock(&self.market_data).clone()
    }

    /// Generate a new strategy.
    ///
    /// The market snapshot is fetched on first use and reused for every
    /// later strategy until [`Self::refresh_market_data`] is called.
    pub fn generate_strategy(&self) -> LifecycleResult<Strategy> {
        let cached = lock(&self.market_data).clone();
        let market = match cached {
            Some(snapshot) => snapshot,
            None => {
                // Fetch without holding the lock; a concurrent fetch that
                // landed first wins.
                let snapshot = self.fetch_market_data().map_err(|e| {
                    error!("Strategy generation failed: {}", e);
                    e
                })?;
                lock(&self.market_data).get_or_insert(snapshot).clone()
            }
        };

        let risk_score = self.calculate_risk(&market);

        let mut cache = lock(&self.cache);
        let strategy = Strategy {
            id: cache.ids.next_id(),
            direction: self.template.direction,
            entry_rule: self.template.entry_rule.clone(),
            exit_rule: self.template.exit_rule.clone(),
            risk_score,
            market_conditions: market,
        };
        cache.strategies.push(strategy.clone());

        info!("Generated strategy {}", strategy.id);
        Ok(strategy)
    }

    fn calculate_risk(&self, market: &MarketSnapshot) -> f64 {
        let score = self.risk_model.assess(market);
        if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            warn!(
                "Risk model {} returned {}, scoring as maximum risk",
                self.risk_model.name(),
                score
            );
            1.0
        }
    }

    /// Look up a previously generated strategy.
    pub fn get_strategy(&self, strategy_id: &str) -> Option<Strategy> {
        let cache = lock(&self.cache);
        let found = cache.strategies.iter().find(|s| s.id == strategy_id).cloned();
        if found.is_none() {
            warn!("Strategy {} not found", strategy_id);
        }
        found
    }

    /// Snapshot of every generated strategy, oldest first.
    pub fn list_strategies(&self) -> Vec<Strategy> {
        lock(&self.cache).strategies.clone()
    }

    /// Number of strategies generated so far.
    pub fn len(&self) -> usize {
        lock(&self.cache).strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StrategyGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::VolatilityRisk;
    use lifecycle_core::error::LifecycleError;
    use lifecycle_core::types::Trend;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        volatility: f64,
    }

    impl MarketDataSource for CountingSource {
        fn fetch(&self) -> Result<MarketSnapshot, DataSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            MarketSnapshot::now(Trend::Bull, self.volatility)
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct BrokenSource;

    impl MarketDataSource for BrokenSource {
        fn fetch(&self) -> Result<MarketSnapshot, DataSourceError> {
            Err(DataSourceError::Connection("refused".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let generator = StrategyGenerator::default();
        let ids: Vec<String> = (0..5)
            .map(|_| generator.generate_strategy().unwrap().id)
            .collect();

        assert_eq!(ids, vec!["GAN_1", "GAN_2", "GAN_3", "GAN_4", "GAN_5"]);
    }

    #[test]
    fn test_generated_strategy_fields() {
        let generator = StrategyGenerator::default();
        let strategy = generator.generate_strategy().unwrap();

        assert_eq!(strategy.direction, Direction::Long);
        assert_eq!(strategy.entry_rule, "current_price");
        assert_eq!(strategy.exit_rule, "target_profit_20%");
        assert_eq!(strategy.risk_score, 0.7);
        assert_eq!(strategy.market_conditions.trend, Trend::Bull);
        assert!(strategy.validate().is_ok());
    }

    #[test]
    fn test_market_snapshot_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let generator = StrategyGenerator::default().with_source(Box::new(CountingSource {
            calls: calls.clone(),
            volatility: 0.15,
        }));

        let first = generator.generate_strategy().unwrap();
        let second = generator.generate_strategy().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.market_conditions, second.market_conditions);
        assert_eq!(generator.market_data(), Some(first.market_conditions));
    }

    #[test]
    fn test_refresh_replaces_cached_snapshot() {
        let calls = Arc::new(AtomicUsize::new(0));
        let generator = StrategyGenerator::default().with_source(Box::new(CountingSource {
            calls: calls.clone(),
            volatility: 0.15,
        }));

        generator.generate_strategy().unwrap();
        let refreshed = generator.refresh_market_data().unwrap();
        let after = generator.generate_strategy().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(after.market_conditions, refreshed);
    }

    #[test]
    fn test_fetch_does_not_cache() {
        let generator = StrategyGenerator::default();
        generator.fetch_market_data().unwrap();
        assert!(generator.market_data().is_none());
    }

    #[test]
    fn test_unknown_data_source_fails() {
        let generator = StrategyGenerator::new(GeneratorConfig {
            data_source: "carrier_pigeon".to_string(),
            ..Default::default()
        });

        assert!(matches!(
            generator.fetch_market_data(),
            Err(DataSourceError::Unsupported(_))
        ));
        assert!(matches!(
            generator.generate_strategy(),
            Err(LifecycleError::DataSource(DataSourceError::Unsupported(_)))
        ));
        assert!(generator.is_empty());
    }

    #[test]
    fn test_source_failure_propagates() {
        let generator = StrategyGenerator::default().with_source(Box::new(BrokenSource));
        let err = generator.generate_strategy().unwrap_err();

        assert!(matches!(
            err,
            LifecycleError::DataSource(DataSourceError::Connection(_))
        ));
        assert!(generator.market_data().is_none());
    }

    #[test]
    fn test_get_strategy() {
        let generator = StrategyGenerator::default();
        let first = generator.generate_strategy().unwrap();
        let second = generator.generate_strategy().unwrap();

        assert_eq!(generator.get_strategy("GAN_1"), Some(first));
        assert_eq!(generator.get_strategy("GAN_2"), Some(second));
        assert_eq!(generator.get_strategy("GAN_3"), None);
    }

    #[test]
    fn test_list_strategies_returns_copy() {
        let generator = StrategyGenerator::default();
        generator.generate_strategy().unwrap();

        let mut listed = generator.list_strategies();
        listed.clear();

        assert_eq!(generator.list_strategies().len(), 1);
    }

    #[test]
    fn test_risk_varies_with_market() {
        let calm = StrategyGenerator::default()
            .with_source(Box::new(CountingSource {
                calls: Arc::new(AtomicUsize::new(0)),
                volatility: 0.05,
            }))
            .with_risk_model(Box::new(VolatilityRisk::default()));
        let wild = StrategyGenerator::default()
            .with_source(Box::new(CountingSource {
                calls: Arc::new(AtomicUsize::new(0)),
                volatility: 0.3,
            }))
            .with_risk_model(Box::new(VolatilityRisk::default()));

        let calm_risk = calm.generate_strategy().unwrap().risk_score;
        let wild_risk = wild.generate_strategy().unwrap().risk_score;
        assert!(calm_risk < wild_risk);
        assert!(wild_risk <= 1.0);
    }

    #[test]
    fn test_concurrent_generation_keeps_ids_unique() {
        let generator = Arc::new(StrategyGenerator::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| generator.generate_strategy().unwrap().id)
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
        assert_eq!(generator.len(), 100);
    }

    #[test]
    fn test_named_static_source_returns_fixed_snapshot() {
        let generator = StrategyGenerator::new(GeneratorConfig {
            data_source: "static".to_string(),
            ..Default::default()
        });

        let first = generator.fetch_market_data().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = generator.fetch_market_data().unwrap();

        assert_eq!(first, second);
        assert_eq!(generator.data_source(), "static");
    }

    #[test]
    fn test_market_data_readable_during_slow_fetch() {
        struct SlowSource;

        impl MarketDataSource for SlowSource {
            fn fetch(&self) -> Result<MarketSnapshot, DataSourceError> {
                std::thread::sleep(std::time::Duration::from_millis(300));
                MarketSnapshot::now(Trend::Bull, 0.15)
            }

            fn name(&self) -> &str {
                "slow"
            }
        }

        let generator = Arc::new(StrategyGenerator::default().with_source(Box::new(SlowSource)));
        let worker = {
            let generator = Arc::clone(&generator);
            std::thread::spawn(move || generator.generate_strategy().unwrap())
        };

        std::thread::sleep(std::time::Duration::from_millis(50));
        let started = std::time::Instant::now();
        assert!(generator.market_data().is_none());
        assert!(started.elapsed() < std::time::Duration::from_millis(200));

        let strategy = worker.join().unwrap();
        assert_eq!(generator.market_data(), Some(strategy.market_conditions));
    }

    #[test]
    fn test_knowledge_base_and_source_names() {
        let generator = StrategyGenerator::default();
        assert_eq!(generator.knowledge_base(), "local");
        assert_eq!(generator.data_source(), "api");

        let injected = StrategyGenerator::default().with_source(Box::new(BrokenSource));
        assert_eq!(injected.data_source(), "broken");
    }
}
