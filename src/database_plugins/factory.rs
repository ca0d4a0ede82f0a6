// ABOUTME: Database factory selecting the measurement store backend from configuration
// ABOUTME: Wraps concrete backends in one enum that itself implements MeasurementStore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

//! Database factory for creating measurement stores
//!
//! The backend is chosen from the parsed [`DatabaseUrl`]. Only `SQLite` is
//! compiled in; other schemes are rejected while the configuration is parsed.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::sqlite::SqliteStore;
use super::{MeasurementFilter, MeasurementPatch, MeasurementStore};
use crate::config::database::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{Measurement, MeasurementAggregate, MeasurementSort, UserStats};
use crate::pagination::PageRequest;

/// Database instance wrapper that delegates to the selected backend
#[derive(Clone)]
pub enum Database {
    /// File or in-memory `SQLite`
    SQLite(SqliteStore),
}

impl Database {
    /// Connect to the configured backend, running migrations when `auto_migrate` is set
    ///
    /// # Errors
    ///
    /// Returns a `DATABASE_ERROR` if connecting or migrating fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let database = match &config.url {
            DatabaseUrl::SQLite { .. } | DatabaseUrl::Memory => {
                info!(database = %config.url, "Initializing SQLite measurement store");
                Self::SQLite(SqliteStore::connect(config).await?)
            }
        };

        if config.auto_migrate {
            database
                .migrate()
                .await
                .map_err(|e| AppError::from(e).with_details(serde_json::json!({
                    "backend": database.backend_name(),
                })))?;
            info!(backend = database.backend_name(), "Measurement schema migrated");
        }

        Ok(database)
    }

    /// Human readable backend description
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::SQLite(_) => "SQLite (embedded)",
        }
    }
}

#[async_trait]
impl MeasurementStore for Database {
    fn backend_name(&self) -> &'static str {
        match self {
            Self::SQLite(db) => db.backend_name(),
        }
    }

    async fn migrate(&self) -> Result<(), DatabaseError> {
        match self {
            Self::SQLite(db) => db.migrate().await,
        }
    }

    async fn insert_measurement(&self, measurement: &Measurement) -> Result<(), DatabaseError> {
        match self {
            Self::SQLite(db) => db.insert_measurement(measurement).await,
        }
    }

    async fn find_measurement(
        &self,
        filter: &MeasurementFilter,
    ) -> Result<Option<Measurement>, DatabaseError> {
        match self {
            Self::SQLite(db) => db.find_measurement(filter).await,
        }
    }

    async fn find_measurements(
        &self,
        filter: &MeasurementFilter,
        sort: MeasurementSort,
        page: PageRequest,
    ) -> Result<Vec<Measurement>, DatabaseError> {
        match self {
            Self::SQLite(db) => db.find_measurements(filter, sort, page).await,
        }
    }

    async fn count_measurements(&self, filter: &MeasurementFilter) -> Result<u64, DatabaseError> {
        match self {
            Self::SQLite(db) => db.count_measurements(filter).await,
        }
    }

    async fn update_measurement(
        &self,
        filter: &MeasurementFilter,
        patch: &MeasurementPatch,
    ) -> Result<u64, DatabaseError> {
        match self {
            Self::SQLite(db) => db.update_measurement(filter, patch).await,
        }
    }

    async fn aggregate_measurements(
        &self,
        filter: &MeasurementFilter,
    ) -> Result<Option<MeasurementAggregate>, DatabaseError> {
        match self {
            Self::SQLite(db) => db.aggregate_measurements(filter).await,
        }
    }

    async fn find_user_stats(&self, user_id: Uuid) -> Result<Option<UserStats>, DatabaseError> {
        match self {
            Self::SQLite(db) => db.find_user_stats(user_id).await,
        }
    }

    async fn upsert_user_stats(&self, stats: &UserStats) -> Result<(), DatabaseError> {
        match self {
            Self::SQLite(db) => db.upsert_user_stats(stats).await,
        }
    }
}
