// ABOUTME: Stats Aggregator recomputing the per-user UserStats projection
// ABOUTME: Aggregates live measurements through the store and replaces the cached row wholesale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use std::sync::Arc;

use handfit_intelligence::project_user_stats;
use tracing::debug;
use uuid::Uuid;

use super::now;
use crate::database_plugins::{MeasurementFilter, MeasurementStore};
use crate::errors::AppResult;
use crate::models::UserStats;

/// Recomputes [`UserStats`] from a user's live measurements
#[derive(Clone)]
pub struct StatsAggregator {
    store: Arc<dyn MeasurementStore>,
}

impl StatsAggregator {
    /// Create an aggregator over `store`
    #[must_use]
    pub fn new(store: Arc<dyn MeasurementStore>) -> Self {
        Self { store }
    }

    /// Derive stats without writing them
    ///
    /// # Errors
    ///
    /// Returns an internal error if the aggregate query fails
    pub async fn compute(&self, user_id: Uuid) -> AppResult<UserStats> {
        let aggregate = self
            .store
            .aggregate_measurements(&MeasurementFilter::active(user_id))
            .await?;
        Ok(project_user_stats(user_id, aggregate, now()))
    }

    /// Derive stats and upsert them, returning what was written
    ///
    /// Safe to repeat: the row is replaced wholesale and only `updated_at`
    /// differs between back-to-back runs.
    ///
    /// # Errors
    ///
    /// Returns an internal error if aggregating or upserting fails
    pub async fn recompute(&self, user_id: Uuid) -> AppResult<UserStats> {
        let stats = self.compute(user_id).await?;
        self.store.upsert_user_stats(&stats).await?;
        debug!(
            user_id = %user_id,
            count = stats.measurement_count,
            hand_size = stats.hand_size.as_str(),
            "Recomputed user stats"
        );
        Ok(stats)
    }
}
