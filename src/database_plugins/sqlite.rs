// ABOUTME: SQLite implementation of the MeasurementStore trait using sqlx
// ABOUTME: Translates MeasurementFilter into SQL in one place and stores timestamps as fixed-width UTC text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use tracing::{debug, info};
use uuid::Uuid;

use super::{MeasurementFilter, MeasurementPatch, MeasurementStore};
use crate::config::database::{DatabaseConfig, DatabaseUrl};
use crate::constants::tables;
use crate::errors::DatabaseError;
use crate::models::{
    HandSize, Measurement, MeasurementAggregate, MeasurementQuality, MeasurementSort,
    MeasurementSortField, QualityFactors, QualityLevel, SortOrder, UserStats,
};
use crate::pagination::PageRequest;

const MEASUREMENT_COLUMNS: &str = "id, user_id, palm, length, device, quality_score, \
     quality_level, calibration, stability, consistency, deleted, created_at, updated_at";

const USER_STATS_COLUMNS: &str = "user_id, average_palm, average_length, hand_size, \
     measurement_count, last_measured_at, updated_at";

/// `SQLite`-backed measurement store
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a pool for the configured database
    ///
    /// File databases are created if missing, along with their parent
    /// directory. An in-memory database lives on a single pinned connection
    /// so every query sees the same data.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the directory cannot be created or the
    /// pool cannot connect
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if let DatabaseUrl::SQLite { path } = &config.url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    DatabaseError::ConnectionError {
                        context: format!("creating {}: {e}", parent.display()),
                    }
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&config.url.to_connection_string())?
            .create_if_missing(true);

        let pool_options = if config.url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        info!(database = %config.url, "Connected to SQLite");
        Ok(Self { pool })
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Append the WHERE clause for `filter`; every measurement query goes through here
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &MeasurementFilter) {
    builder
        .push(" WHERE deleted = 0 AND user_id = ")
        .push_bind(filter.user_id().to_string());
    if let Some(id) = filter.id() {
        builder.push(" AND id = ").push_bind(id.to_string());
    }
    if let Some(from) = filter.lower_bound() {
        builder
            .push(" AND created_at >= ")
            .push_bind(encode_timestamp(from));
    }
    if let Some(before) = filter.upper_bound() {
        builder
            .push(" AND created_at < ")
            .push_bind(encode_timestamp(before));
    }
}

const fn sort_column(field: MeasurementSortField) -> &'static str {
    match field {
        MeasurementSortField::CreatedAt => "created_at",
        MeasurementSortField::Palm => "palm",
        MeasurementSortField::Length => "length",
        MeasurementSortField::Quality => "quality_score",
    }
}

const fn sort_direction(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

/// Fixed-width RFC 3339 so lexical order equals chronological order
fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(entity: &'static str, raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DatabaseError::decode(entity, format!("timestamp '{raw}': {e}")))
}

fn decode_uuid(entity: &'static str, raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw).map_err(|e| DatabaseError::decode(entity, format!("id '{raw}': {e}")))
}

fn row_to_measurement(row: &SqliteRow) -> Result<Measurement, DatabaseError> {
    const ENTITY: &str = "measurement";

    let level: String = row.try_get("quality_level")?;
    let quality = MeasurementQuality {
        score: row.try_get("quality_score")?,
        level: QualityLevel::parse(&level)
            .ok_or_else(|| DatabaseError::decode(ENTITY, format!("quality level '{level}'")))?,
        factors: QualityFactors {
            calibration: row.try_get("calibration")?,
            stability: row.try_get("stability")?,
            consistency: row.try_get("consistency")?,
        },
    };

    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Measurement {
        id: decode_uuid(ENTITY, &id)?,
        user_id: decode_uuid(ENTITY, &user_id)?,
        palm: row.try_get("palm")?,
        length: row.try_get("length")?,
        device: row.try_get("device")?,
        quality,
        deleted: row.try_get("deleted")?,
        created_at: decode_timestamp(ENTITY, &created_at)?,
        updated_at: decode_timestamp(ENTITY, &updated_at)?,
    })
}

fn row_to_user_stats(row: &SqliteRow) -> Result<UserStats, DatabaseError> {
    const ENTITY: &str = "user stats";

    let user_id: String = row.try_get("user_id")?;
    let hand_size: String = row.try_get("hand_size")?;
    let count: i64 = row.try_get("measurement_count")?;
    let last_measured_at: Option<String> = row.try_get("last_measured_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(UserStats {
        user_id: decode_uuid(ENTITY, &user_id)?,
        average_palm: row.try_get("average_palm")?,
        average_length: row.try_get("average_length")?,
        hand_size: HandSize::parse(&hand_size)
            .ok_or_else(|| DatabaseError::decode(ENTITY, format!("hand size '{hand_size}'")))?,
        measurement_count: u64::try_from(count)
            .map_err(|_| DatabaseError::decode(ENTITY, format!("negative count {count}")))?,
        last_measured_at: last_measured_at
            .as_deref()
            .map(|raw| decode_timestamp(ENTITY, raw))
            .transpose()?,
        updated_at: decode_timestamp(ENTITY, &updated_at)?,
    })
}

#[async_trait]
impl MeasurementStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn migrate(&self) -> Result<(), DatabaseError> {
        let statements = [
            format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    palm REAL NOT NULL,
                    length REAL NOT NULL,
                    device TEXT,
                    quality_score INTEGER NOT NULL,
                    quality_level TEXT NOT NULL CHECK (quality_level IN ('low', 'medium', 'high')),
                    calibration INTEGER NOT NULL,
                    stability REAL NOT NULL,
                    consistency REAL NOT NULL,
                    deleted INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                tables::MEASUREMENTS
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS idx_measurements_owner_created
                    ON {} (user_id, deleted, created_at)",
                tables::MEASUREMENTS
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    user_id TEXT PRIMARY KEY,
                    average_palm REAL NOT NULL,
                    average_length REAL NOT NULL,
                    hand_size TEXT NOT NULL,
                    measurement_count INTEGER NOT NULL,
                    last_measured_at TEXT,
                    updated_at TEXT NOT NULL
                )",
                tables::USER_STATS
            ),
        ];

        for statement in &statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::MigrationError {
                    context: e.to_string(),
                })?;
        }

        debug!("Measurement schema is up to date");
        Ok(())
    }

    async fn insert_measurement(&self, measurement: &Measurement) -> Result<(), DatabaseError> {
        let query = format!(
            "INSERT INTO {} ({MEASUREMENT_COLUMNS})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            tables::MEASUREMENTS
        );

        sqlx::query(&query)
            .bind(measurement.id.to_string())
            .bind(measurement.user_id.to_string())
            .bind(measurement.palm)
            .bind(measurement.length)
            .bind(measurement.device.as_deref())
            .bind(measurement.quality.score)
            .bind(measurement.quality.level.as_str())
            .bind(measurement.quality.factors.calibration)
            .bind(measurement.quality.factors.stability)
            .bind(measurement.quality.factors.consistency)
            .bind(measurement.deleted)
            .bind(encode_timestamp(measurement.created_at))
            .bind(encode_timestamp(measurement.updated_at))
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("insert measurement", e))?;

        Ok(())
    }

    async fn find_measurement(
        &self,
        filter: &MeasurementFilter,
    ) -> Result<Option<Measurement>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {MEASUREMENT_COLUMNS} FROM {}",
            tables::MEASUREMENTS
        ));
        push_filter(&mut builder, filter);
        builder.push(" LIMIT 1");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("find measurement", e))?;

        row.as_ref().map(row_to_measurement).transpose()
    }

    async fn find_measurements(
        &self,
        filter: &MeasurementFilter,
        sort: MeasurementSort,
        page: PageRequest,
    ) -> Result<Vec<Measurement>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {MEASUREMENT_COLUMNS} FROM {}",
            tables::MEASUREMENTS
        ));
        push_filter(&mut builder, filter);

        let direction = sort_direction(sort.order);
        builder.push(format!(
            " ORDER BY {} {direction}, id {direction}",
            sort_column(sort.field)
        ));
        builder
            .push(" LIMIT ")
            .push_bind(i64::from(page.limit()))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("list measurements", e))?;

        rows.iter().map(row_to_measurement).collect()
    }

    async fn count_measurements(&self, filter: &MeasurementFilter) -> Result<u64, DatabaseError> {
        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {}", tables::MEASUREMENTS));
        push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("count measurements", e))?;

        u64::try_from(count)
            .map_err(|_| DatabaseError::decode("measurement count", count.to_string()))
    }

    async fn update_measurement(
        &self,
        filter: &MeasurementFilter,
        patch: &MeasurementPatch,
    ) -> Result<u64, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "UPDATE {} SET updated_at = ",
            tables::MEASUREMENTS
        ));
        builder.push_bind(encode_timestamp(patch.updated_at));

        if let Some(palm) = patch.palm {
            builder.push(", palm = ").push_bind(palm);
        }
        if let Some(length) = patch.length {
            builder.push(", length = ").push_bind(length);
        }
        if let Some(quality) = patch.quality {
            builder
                .push(", quality_score = ")
                .push_bind(quality.score)
                .push(", quality_level = ")
                .push_bind(quality.level.as_str())
                .push(", calibration = ")
                .push_bind(quality.factors.calibration)
                .push(", stability = ")
                .push_bind(quality.factors.stability)
                .push(", consistency = ")
                .push_bind(quality.factors.consistency);
        }
        if let Some(deleted) = patch.deleted {
            builder.push(", deleted = ").push_bind(deleted);
        }
        push_filter(&mut builder, filter);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("update measurement", e))?;

        Ok(result.rows_affected())
    }

    async fn aggregate_measurements(
        &self,
        filter: &MeasurementFilter,
    ) -> Result<Option<MeasurementAggregate>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT COUNT(*) AS measurement_count, AVG(palm) AS average_palm, \
             AVG(length) AS average_length, MAX(created_at) AS last_measured_at FROM {}",
            tables::MEASUREMENTS
        ));
        push_filter(&mut builder, filter);

        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("aggregate measurements", e))?;

        let count: i64 = row.try_get("measurement_count")?;
        if count <= 0 {
            return Ok(None);
        }

        let average_palm: Option<f64> = row.try_get("average_palm")?;
        let average_length: Option<f64> = row.try_get("average_length")?;
        let last_measured_at: Option<String> = row.try_get("last_measured_at")?;

        Ok(Some(MeasurementAggregate {
            average_palm: average_palm.unwrap_or_default(),
            average_length: average_length.unwrap_or_default(),
            count: count.unsigned_abs(),
            last_measured_at: last_measured_at
                .as_deref()
                .map(|raw| decode_timestamp("measurement aggregate", raw))
                .transpose()?,
        }))
    }

    async fn find_user_stats(&self, user_id: Uuid) -> Result<Option<UserStats>, DatabaseError> {
        let query = format!(
            "SELECT {USER_STATS_COLUMNS} FROM {} WHERE user_id = ?",
            tables::USER_STATS
        );

        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("find user stats", e))?;

        row.as_ref().map(row_to_user_stats).transpose()
    }

    async fn upsert_user_stats(&self, stats: &UserStats) -> Result<(), DatabaseError> {
        let query = format!(
            "INSERT INTO {} ({USER_STATS_COLUMNS})
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                average_palm = excluded.average_palm,
                average_length = excluded.average_length,
                hand_size = excluded.hand_size,
                measurement_count = excluded.measurement_count,
                last_measured_at = excluded.last_measured_at,
                updated_at = excluded.updated_at",
            tables::USER_STATS
        );

        sqlx::query(&query)
            .bind(stats.user_id.to_string())
            .bind(stats.average_palm)
            .bind(stats.average_length)
            .bind(stats.hand_size.as_str())
            .bind(i64::try_from(stats.measurement_count).unwrap_or(i64::MAX))
            .bind(stats.last_measured_at.map(encode_timestamp))
            .bind(encode_timestamp(stats.updated_at))
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("upsert user stats", e))?;

        Ok(())
    }
}
