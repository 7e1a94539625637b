//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Service configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Port for the REST server.
    pub port: u16,
    /// Path to the libSQL database file.
    pub db_path: PathBuf,
    /// Upper bound for the simulated submission delay.
    pub submit_delay_cap: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: PathBuf::from("./data/onboard.db"),
            submit_delay_cap: Duration::from_millis(2000),
        }
    }
}

impl ServiceConfig {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// `ONBOARD_PORT`, `ONBOARD_DB_PATH`, `ONBOARD_SUBMIT_DELAY_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match std::env::var("ONBOARD_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ONBOARD_PORT".to_string(),
                message: format!("not a valid port: {raw}"),
            })?,
            Err(_) => defaults.port,
        };

        let db_path = std::env::var("ONBOARD_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let submit_delay_cap = match std::env::var("ONBOARD_SUBMIT_DELAY_MS") {
            Ok(raw) => {
                let ms: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "ONBOARD_SUBMIT_DELAY_MS".to_string(),
                    message: format!("not a millisecond count: {raw}"),
                })?;
                Duration::from_millis(ms)
            }
            Err(_) => defaults.submit_delay_cap,
        };

        Ok(Self {
            port,
            db_path,
            submit_delay_cap,
        })
    }
}
