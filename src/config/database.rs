// ABOUTME: Database configuration types for SQLite connections
// ABOUTME: Parses DATABASE_URL and pool sizing from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::environment::env_var_or;
use crate::errors::{AppError, AppResult};

/// Default on-disk database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/handfit.db";

/// Default connection pool size for file-backed databases
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite`, lives as long as the pool
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// A bare path without a scheme is treated as a `SQLite` file.
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for any scheme other than `sqlite:`, or an empty path
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if let Some(path_str) = trimmed.strip_prefix("sqlite:") {
            let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
            if path_str == ":memory:" {
                return Ok(Self::Memory);
            }
            if path_str.is_empty() {
                return Err(AppError::config_invalid("DATABASE_URL has an empty sqlite path"));
            }
            return Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            });
        }

        if trimmed.is_empty() || trimmed.contains("://") {
            return Err(AppError::config_invalid(format!(
                "Unsupported DATABASE_URL '{trimmed}': only sqlite is supported"
            )));
        }

        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/handfit.db"),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection and bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Create tables on startup
    pub auto_migrate: bool,
    /// Pool size; in-memory databases always use a single connection
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            auto_migrate: true,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// In-memory configuration with migrations enabled
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: DatabaseUrl::Memory,
            ..Self::default()
        }
    }

    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if `DATABASE_URL`, `AUTO_MIGRATE`, or
    /// `DATABASE_MAX_CONNECTIONS` cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        Self::from_env_with_url(None)
    }

    /// Load database configuration from environment, with `url` taking
    /// precedence over `DATABASE_URL`
    ///
    /// `DATABASE_URL` is not read when `url` is supplied.
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the effective URL, `AUTO_MIGRATE`, or
    /// `DATABASE_MAX_CONNECTIONS` cannot be parsed
    pub fn from_env_with_url(url: Option<&str>) -> AppResult<Self> {
        let url = match url {
            Some(url) => DatabaseUrl::parse_url(url)?,
            None => DatabaseUrl::parse_url(
                &env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
            )?,
        };

        let auto_migrate = env_var_or("AUTO_MIGRATE", "true")
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid AUTO_MIGRATE value: {e}")))?;

        let max_connections: u32 = env_var_or(
            "DATABASE_MAX_CONNECTIONS",
            &DEFAULT_MAX_CONNECTIONS.to_string(),
        )
        .parse()
        .map_err(|e| {
            AppError::config_invalid(format!("Invalid DATABASE_MAX_CONNECTIONS value: {e}"))
        })?;
        if max_connections == 0 {
            return Err(AppError::config_invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1",
            ));
        }

        Ok(Self {
            url,
            auto_migrate,
            max_connections,
        })
    }
}
