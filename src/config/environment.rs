// ABOUTME: Environment-based configuration loading for the Handfit platform
// ABOUTME: Assembles database, background stats, and logging settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

//! Environment-based configuration management

use std::env;
use std::time::Duration;

use super::database::DatabaseConfig;
use crate::constants::stats::DEFAULT_RECOMPUTE_TIMEOUT_SECS;
use crate::errors::{AppError, AppResult};
use crate::logging::LoggingConfig;

/// Settings for background statistics recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsConfig {
    /// Upper bound on a single detached recompute
    pub recompute_timeout: Duration,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            recompute_timeout: Duration::from_secs(DEFAULT_RECOMPUTE_TIMEOUT_SECS),
        }
    }
}

impl StatsConfig {
    /// Load from `STATS_RECOMPUTE_TIMEOUT_SECS`
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the value is not a positive integer
    pub fn from_env() -> AppResult<Self> {
        let secs: u64 = env_var_or(
            "STATS_RECOMPUTE_TIMEOUT_SECS",
            &DEFAULT_RECOMPUTE_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .map_err(|e| {
            AppError::config_invalid(format!("Invalid STATS_RECOMPUTE_TIMEOUT_SECS value: {e}"))
        })?;
        if secs == 0 {
            return Err(AppError::config_invalid(
                "STATS_RECOMPUTE_TIMEOUT_SECS must be greater than zero",
            ));
        }
        Ok(Self {
            recompute_timeout: Duration::from_secs(secs),
        })
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default)]
pub struct HandfitConfig {
    /// Database settings
    pub database: DatabaseConfig,
    /// Background stats settings
    pub stats: StatsConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl HandfitConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable holds an invalid value
    pub fn from_env() -> AppResult<Self> {
        Self::from_env_with_database_url(None)
    }

    /// Load configuration from environment variables, using `database_url`
    /// instead of `DATABASE_URL` when supplied
    ///
    /// # Errors
    ///
    /// Returns an error if any consulted value is invalid
    pub fn from_env_with_database_url(database_url: Option<&str>) -> AppResult<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env_with_url(database_url)?,
            stats: StatsConfig::from_env()?,
            logging: LoggingConfig::from_env(),
        })
    }

    /// One-line, credential-free description for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Handfit configuration: database={}, auto_migrate={}, max_connections={}, recompute_timeout={}s",
            self.database.url,
            self.database.auto_migrate,
            self.database.max_connections,
            self.stats.recompute_timeout.as_secs()
        )
    }
}

/// Read an environment variable, falling back to `default` when unset
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
