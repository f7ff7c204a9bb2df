//! Application configuration management.
//!
//! Configuration comes from three layered sources with a clear precedence
//! order: built-in defaults, then an optional config file, then `APP_*`
//! environment variables.

use crate::{Cli, schedule::Scheduler, sim::SimConfig};
use mgx_core::models::MarketConfig;
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, pagination limit)
    #[serde(default)]
    pub server: mgx_axum::config::AxumConfig,

    /// Database configuration (file path, creation behavior)
    #[serde(default)]
    pub database: mgx_sqlite::config::SqliteConfig,

    /// Trading-cycle scheduling configuration
    #[serde(default)]
    pub schedule: Scheduler,

    /// Market pricing constants (offer prices, grid fallback price)
    #[serde(default)]
    pub market: MarketConfig,

    /// Meter-reading simulation configuration
    #[serde(default)]
    pub simulation: SimConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Run against a file-backed database
    /// export APP_DATABASE__DATABASE_PATH="/data/exchange.db"
    ///
    /// # Bind elsewhere
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    ///
    /// # Settle one cycle per hour
    /// export APP_SCHEDULE__EVERY="1h"
    ///
    /// # Charge more for grid fallback energy
    /// export APP_MARKET__GRID_PRICE_PER_KWH="0.42"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
