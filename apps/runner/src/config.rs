//! Runner configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use rebate_db::DbConfig;

/// Runner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub max_connections: u32,

    /// How long to wait for a pooled connection
    pub connect_timeout: Duration,
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Environment Variables
    /// - `REBATE_DB_PATH`: database file (default `rebate.db`)
    /// - `REBATE_DB_MAX_CONNECTIONS`: pool size (default `5`)
    /// - `REBATE_DB_CONNECT_TIMEOUT_SECS`: acquire timeout (default `30`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = RunnerConfig {
            database_path: lookup("REBATE_DB_PATH")
                .filter(|path| !path.trim().is_empty())
                .unwrap_or_else(|| "rebate.db".to_string())
                .into(),

            max_connections: lookup("REBATE_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .trim()
                .parse()
                .ok()
                .filter(|max: &u32| *max > 0)
                .ok_or_else(|| ConfigError::InvalidValue("REBATE_DB_MAX_CONNECTIONS".to_string()))?,

            connect_timeout: lookup("REBATE_DB_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| {
                    ConfigError::InvalidValue("REBATE_DB_CONNECT_TIMEOUT_SECS".to_string())
                })?,
        };

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
            .max_connections(self.max_connections)
            .connect_timeout(self.connect_timeout)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
