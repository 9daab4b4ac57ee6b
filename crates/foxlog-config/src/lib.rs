//! # foxlog-config
//!
//! Layered configuration loading for foxlog using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FOXLOG_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `./foxlog.toml`
//! 4. User-level `~/.config/foxlog/config.toml`
//! 5. Built-in defaults
//!
//! CLI flags are applied on top of the extracted value by `foxlog-cli`.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FOXLOG_MONGODB__URI` -> `mongodb.uri`,
//! `FOXLOG_BOOTSTRAP__ENABLE_TTL` -> `bootstrap.enable_ttl`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use foxlog_config::FoxlogConfig;
//!
//! let config = FoxlogConfig::load_with_dotenv(None).expect("config");
//! println!("target: {}.{}", config.bootstrap.database, config.bootstrap.collection);
//! ```

mod bootstrap;
mod error;
mod mongodb;

pub use bootstrap::BootstrapConfig;
pub use error::ConfigError;
pub use mongodb::MongoConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "foxlog.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "FOXLOG_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FoxlogConfig {
    #[serde(default)]
    pub mongodb: MongoConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl FoxlogConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or stack extra providers.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file. Missing is an error, not a silent skip.
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values the bootstrapper cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mongodb.uri.trim().is_empty() {
            return Err(ConfigError::invalid("mongodb.uri", "must not be empty"));
        }
        if !self.mongodb.uri.starts_with("mongodb://")
            && !self.mongodb.uri.starts_with("mongodb+srv://")
        {
            return Err(ConfigError::invalid(
                "mongodb.uri",
                "must start with mongodb:// or mongodb+srv://",
            ));
        }
        if self.mongodb.connect_attempts == 0 {
            return Err(ConfigError::invalid(
                "mongodb.connect_attempts",
                "must be at least 1",
            ));
        }
        if self.bootstrap.database.trim().is_empty() {
            return Err(ConfigError::invalid("bootstrap.database", "must not be empty"));
        }
        if self.bootstrap.collection.trim().is_empty() {
            return Err(ConfigError::invalid(
                "bootstrap.collection",
                "must not be empty",
            ));
        }
        if self.bootstrap.ttl_seconds == 0 {
            return Err(ConfigError::invalid(
                "bootstrap.ttl_seconds",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("foxlog").join("config.toml"))
    }
}
