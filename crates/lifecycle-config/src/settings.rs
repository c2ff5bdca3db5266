//! Configuration structures.

use lifecycle_data::MarketSettings;
use lifecycle_generator::{GeneratorConfig, RISK_MODEL_NAMES};
use lifecycle_implementer::ExecutionSettings;
use lifecycle_tester::BacktestSettings;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub market: MarketSettings,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub execution: ExecutionSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "strategy-lifecycle".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Strategy generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub knowledge_base: String,
    pub data_source: String,
    pub risk_model: String,
    /// Score used by the `fixed` risk model
    pub fixed_risk: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            knowledge_base: "local".to_string(),
            data_source: "api".to_string(),
            risk_model: "fixed".to_string(),
            fixed_risk: 0.7,
        }
    }
}

impl AppConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generator configuration derived from these settings.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            knowledge_base: self.generator.knowledge_base.clone(),
            data_source: self.generator.data_source.clone(),
            market: self.market.clone(),
        }
    }

    /// Check every section for out-of-range values.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(SettingsError::invalid(
                "logging.level",
                format!("expected one of {:?}, got '{}'", LOG_LEVELS, self.logging.level),
            ));
        }
        if !LOG_FORMATS.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(SettingsError::invalid(
                "logging.format",
                format!("expected one of {:?}, got '{}'", LOG_FORMATS, self.logging.format),
            ));
        }

        if self.generator.knowledge_base.trim().is_empty() {
            return Err(SettingsError::invalid(
                "generator.knowledge_base",
                "must not be empty",
            ));
        }
        let sources = lifecycle_data::available_sources();
        if !sources.contains(&self.generator.data_source.as_str()) {
            return Err(SettingsError::invalid(
                "generator.data_source",
                format!("expected one of {:?}, got '{}'", sources, self.generator.data_source),
            ));
        }
        if !RISK_MODEL_NAMES.contains(&self.generator.risk_model.as_str()) {
            return Err(SettingsError::invalid(
                "generator.risk_model",
                format!(
                    "expected one of {:?}, got '{}'",
                    RISK_MODEL_NAMES, self.generator.risk_model
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.generator.fixed_risk) {
            return Err(SettingsError::invalid(
                "generator.fixed_risk",
                format!("must be within [0, 1], got {}", self.generator.fixed_risk),
            ));
        }

        if !self.market.volatility.is_finite() || self.market.volatility < 0.0 {
            return Err(SettingsError::invalid(
                "market.volatility",
                format!("must be non-negative, got {}", self.market.volatility),
            ));
        }

        self.backtest
            .validate()
            .map_err(|e| SettingsError::invalid("backtest", e.to_string()))?;

        if self.execution.drawdown < Decimal::ZERO {
            return Err(SettingsError::invalid(
                "execution.drawdown",
                format!("must be non-negative, got {}", self.execution.drawdown),
            ));
        }

        Ok(())
    }
}
