//! [`Config`]-related definitions.

use common::money::Currency;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: Server,

    /// Price model configuration.
    #[serde(default)]
    pub model: Model,

    /// Estimator configuration.
    #[serde(default)]
    pub estimator: Estimator,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,
}

/// Price model configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Model {
    /// Path to the JSON artifact of the fitted model.
    #[default("flat_price_model.json".to_owned())]
    pub path: String,
}

/// Estimator configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Estimator {
    /// Year the building age is measured against.
    #[default(2026)]
    pub reference_year: i32,

    /// Currency of the predicted prices.
    #[default(Currency::Rub)]
    pub currency: Currency,
}

impl From<Estimator> for service::Config {
    fn from(value: Estimator) -> Self {
        let Estimator {
            reference_year,
            currency,
        } = value;

        Self {
            reference_year,
            currency,
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::money::Currency;

    use super::Config;

    #[test]
    fn defaults_without_file() {
        let Config {
            server,
            model,
            estimator,
            log: _,
        } = Config::new("definitely/missing/config.toml").unwrap();

        assert_eq!(server.port, 8080);
        assert_eq!(model.path, "flat_price_model.json");
        assert_eq!(estimator.reference_year, 2026);
        assert_eq!(estimator.currency, Currency::Rub);

        let service = service::Config::from(estimator);
        assert_eq!(service.reference_year, 2026);
    }
}
