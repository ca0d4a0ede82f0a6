// ABOUTME: Persistence abstraction for measurements and per-user statistics
// ABOUTME: MeasurementStore trait plus the shared filter and patch types every backend consumes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::DatabaseError;
use crate::models::{
    Measurement, MeasurementAggregate, MeasurementQuality, MeasurementSort, UserStats,
};
use crate::pagination::PageRequest;

pub mod factory;
pub mod sqlite;

/// Selection of a user's live measurements
///
/// The only constructor is [`MeasurementFilter::active`], so every filter
/// excludes soft-deleted rows and is scoped to one owner. Backends translate
/// the filter in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementFilter {
    user_id: Uuid,
    id: Option<Uuid>,
    created_from: Option<DateTime<Utc>>,
    created_before: Option<DateTime<Utc>>,
}

impl MeasurementFilter {
    /// Live (non-deleted) measurements owned by `user_id`
    #[must_use]
    pub const fn active(user_id: Uuid) -> Self {
        Self {
            user_id,
            id: None,
            created_from: None,
            created_before: None,
        }
    }

    /// Narrow to a single measurement
    #[must_use]
    pub const fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Inclusive lower bound on `created_at`
    #[must_use]
    pub const fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    /// Exclusive upper bound on `created_at`
    #[must_use]
    pub const fn created_before(mut self, before: DateTime<Utc>) -> Self {
        self.created_before = Some(before);
        self
    }

    /// Owner
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Measurement id, when narrowed to one
    #[must_use]
    pub const fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Inclusive lower `created_at` bound
    #[must_use]
    pub const fn lower_bound(&self) -> Option<DateTime<Utc>> {
        self.created_from
    }

    /// Exclusive upper `created_at` bound
    #[must_use]
    pub const fn upper_bound(&self) -> Option<DateTime<Utc>> {
        self.created_before
    }
}

/// Field changes applied by `update_measurement`; `None` leaves a column untouched
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementPatch {
    /// New palm width (mm)
    pub palm: Option<f64>,
    /// New finger length (mm)
    pub length: Option<f64>,
    /// Recomputed quality
    pub quality: Option<MeasurementQuality>,
    /// Soft-delete marker
    pub deleted: Option<bool>,
    /// Always written
    pub updated_at: DateTime<Utc>,
}

impl MeasurementPatch {
    /// A patch that only refreshes `updated_at`
    #[must_use]
    pub const fn touch(updated_at: DateTime<Utc>) -> Self {
        Self {
            palm: None,
            length: None,
            quality: None,
            deleted: None,
            updated_at,
        }
    }

    /// Mark the row deleted
    #[must_use]
    pub const fn soft_delete(updated_at: DateTime<Utc>) -> Self {
        Self {
            deleted: Some(true),
            ..Self::touch(updated_at)
        }
    }
}

/// Measurement persistence
///
/// Implementations must honor the filter's soft-delete scoping on every
/// read, count, update, and aggregate. Cancellation is by dropping the
/// returned future; callers wrap calls in their own timeout.
#[async_trait]
pub trait MeasurementStore: Send + Sync {
    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Create tables and indexes if they do not exist
    async fn migrate(&self) -> Result<(), DatabaseError>;

    /// Insert a new measurement
    async fn insert_measurement(&self, measurement: &Measurement) -> Result<(), DatabaseError>;

    /// First measurement matching the filter
    async fn find_measurement(
        &self,
        filter: &MeasurementFilter,
    ) -> Result<Option<Measurement>, DatabaseError>;

    /// One sorted page of matching measurements
    async fn find_measurements(
        &self,
        filter: &MeasurementFilter,
        sort: MeasurementSort,
        page: PageRequest,
    ) -> Result<Vec<Measurement>, DatabaseError>;

    /// Number of matching measurements
    async fn count_measurements(&self, filter: &MeasurementFilter) -> Result<u64, DatabaseError>;

    /// Apply `patch` to matching measurements, returning the matched row count
    async fn update_measurement(
        &self,
        filter: &MeasurementFilter,
        patch: &MeasurementPatch,
    ) -> Result<u64, DatabaseError>;

    /// Mean palm, mean length, count, and latest `created_at` over matching rows;
    /// `None` when nothing matches
    async fn aggregate_measurements(
        &self,
        filter: &MeasurementFilter,
    ) -> Result<Option<MeasurementAggregate>, DatabaseError>;

    /// Cached stats row for a user
    async fn find_user_stats(&self, user_id: Uuid) -> Result<Option<UserStats>, DatabaseError>;

    /// Replace the user's stats row wholesale, inserting it if missing
    async fn upsert_user_stats(&self, stats: &UserStats) -> Result<(), DatabaseError>;
}
