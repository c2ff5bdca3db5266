//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, GeneratorSettings, LoggingConfig, SettingsError};

use config::{Config, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `LIFECYCLE` prefix with `__` between
/// sections, e.g. `LIFECYCLE__GENERATOR__DATA_SOURCE=static`.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    load(path, true)
}

/// Like [`load_config`], but a missing file yields defaults plus
/// environment overrides.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, SettingsError> {
    load(path, false)
}

fn load(path: &Path, required: bool) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix("LIFECYCLE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}
