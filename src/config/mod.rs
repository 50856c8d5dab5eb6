//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `MEDIA_CATALOG` prefix
//! and nested values are separated with double underscores.
//!
//! # Example
//!
//! ```no_run
//! use media_catalog::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Writing media to {}", config.storage.base_path.display());
//! ```

mod database;
mod error;
mod redis;
mod runtime;
mod storage;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use runtime::{Environment, LogFormat, RuntimeConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Environment and log output
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Redis configuration (encoder queue)
    pub redis: RedisConfig,

    /// Media object storage
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEDIA_CATALOG` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MEDIA_CATALOG__DATABASE__URL=...` -> `database.url = ...`
    /// - `MEDIA_CATALOG__RUNTIME__LOG_FORMAT=json` -> `runtime.log_format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEDIA_CATALOG")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first section that is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.runtime.validate()?;
        self.database.validate()?;
        self.redis.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "MEDIA_CATALOG__DATABASE__URL",
            "postgresql://test@localhost/test",
        );
        env::set_var("MEDIA_CATALOG__REDIS__URL", "redis://localhost:6379");
    }

    fn clear_env() {
        env::remove_var("MEDIA_CATALOG__DATABASE__URL");
        env::remove_var("MEDIA_CATALOG__REDIS__URL");
        env::remove_var("MEDIA_CATALOG__RUNTIME__ENVIRONMENT");
        env::remove_var("MEDIA_CATALOG__RUNTIME__LOG_FORMAT");
        env::remove_var("MEDIA_CATALOG__STORAGE__BASE_PATH");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.redis.url, "redis://localhost:6379");
        assert_eq!(config.redis.encoder_channel, "videos.encoding");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_runtime_and_storage_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.runtime.environment, Environment::Development);
        assert_eq!(config.runtime.log_format, LogFormat::Pretty);
        assert_eq!(config.storage.base_path, PathBuf::from("./data/media"));
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MEDIA_CATALOG__RUNTIME__ENVIRONMENT", "production");
        env::set_var("MEDIA_CATALOG__RUNTIME__LOG_FORMAT", "json");
        env::set_var("MEDIA_CATALOG__STORAGE__BASE_PATH", "/var/lib/catalog");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.runtime.log_format, LogFormat::Json);
        assert_eq!(config.storage.base_path, PathBuf::from("/var/lib/catalog"));
    }

    #[test]
    fn test_missing_database_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("MEDIA_CATALOG__REDIS__URL", "redis://localhost:6379");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
