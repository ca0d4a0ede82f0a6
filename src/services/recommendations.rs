// ABOUTME: Recommendation Engine serving cached user stats and grip/hand-size recommendations
// ABOUTME: Computes stats synchronously on a cache miss; device suggestions come from a pluggable catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use std::sync::Arc;

use async_trait::async_trait;
use handfit_intelligence::{classify_grip, grip_ratio};
use tracing::{debug, info};
use uuid::Uuid;

use super::{parse_user_id, StatsAggregator};
use crate::database_plugins::MeasurementStore;
use crate::errors::{AppError, AppResult};
use crate::models::{DeviceRecommendation, GripType, Recommendation, UserStats};

/// Upper bound of [`DeviceRecommendation::match_score`]
const MAX_MATCH_SCORE: u8 = 100;

/// Source of device suggestions for a hand profile
///
/// Implementations must keep `match_score` within 0-100; the engine
/// rejects anything else as an internal error.
#[async_trait]
pub trait DeviceCatalog: Send + Sync {
    /// Devices suited to `stats` held with `grip`
    async fn recommend(
        &self,
        stats: &UserStats,
        grip: GripType,
    ) -> AppResult<Vec<DeviceRecommendation>>;
}

/// Catalog that never suggests anything
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyDeviceCatalog;

#[async_trait]
impl DeviceCatalog for EmptyDeviceCatalog {
    async fn recommend(
        &self,
        _stats: &UserStats,
        _grip: GripType,
    ) -> AppResult<Vec<DeviceRecommendation>> {
        Ok(Vec::new())
    }
}

/// Reads user stats and turns them into recommendations
#[derive(Clone)]
pub struct RecommendationEngine {
    store: Arc<dyn MeasurementStore>,
    aggregator: StatsAggregator,
    catalog: Arc<dyn DeviceCatalog>,
}

impl RecommendationEngine {
    /// Create an engine with the empty device catalog
    #[must_use]
    pub fn new(store: Arc<dyn MeasurementStore>, aggregator: StatsAggregator) -> Self {
        Self::with_catalog(store, aggregator, Arc::new(EmptyDeviceCatalog))
    }

    /// Create an engine with a custom device catalog
    #[must_use]
    pub fn with_catalog(
        store: Arc<dyn MeasurementStore>,
        aggregator: StatsAggregator,
        catalog: Arc<dyn DeviceCatalog>,
    ) -> Self {
        Self {
            store,
            aggregator,
            catalog,
        }
    }

    /// Cached stats for the caller, computed and stored on a miss
    ///
    /// # Errors
    ///
    /// `AUTH_REQUIRED`/`INVALID_FORMAT` for a bad user id, internal errors
    /// when reading, computing, or storing stats fails
    pub async fn get_user_stats(&self, user_id: &str) -> AppResult<UserStats> {
        let user_id = parse_user_id(user_id)?;
        self.user_stats(user_id).await
    }

    /// Hand size and grip style for the caller
    ///
    /// # Errors
    ///
    /// `INSUFFICIENT_DATA` when the stats hold no usable measurements,
    /// `INTERNAL_ERROR` when the catalog scores a device above 100,
    /// otherwise as for [`Self::get_user_stats`]
    pub async fn get_recommendations(&self, user_id: &str) -> AppResult<Recommendation> {
        let user_id = parse_user_id(user_id)?;
        let stats = self.user_stats(user_id).await?;

        let ratio = grip_ratio(stats.average_palm, stats.average_length)
            .filter(|_| stats.has_usable_data())
            .ok_or_else(|| {
                AppError::insufficient_data(
                    "Not enough measurements to generate recommendations",
                )
                .with_user_id(user_id)
            })?;

        let grip_type = classify_grip(ratio);
        let devices = self.catalog.recommend(&stats, grip_type).await?;
        if let Some(device) = devices.iter().find(|d| d.match_score > MAX_MATCH_SCORE) {
            return Err(AppError::internal(format!(
                "Device catalog returned match score {} for '{}'",
                device.match_score, device.id
            )));
        }

        info!(
            user_id = %user_id,
            ratio,
            grip_type = grip_type.as_str(),
            hand_size = stats.hand_size.as_str(),
            devices = devices.len(),
            "Generated recommendation"
        );

        Ok(Recommendation {
            palm: stats.average_palm,
            length: stats.average_length,
            hand_size: stats.hand_size,
            grip_type,
            devices,
        })
    }

    async fn user_stats(&self, user_id: Uuid) -> AppResult<UserStats> {
        if let Some(stats) = self.store.find_user_stats(user_id).await? {
            return Ok(stats);
        }
        debug!(user_id = %user_id, "User stats cache miss, computing");
        self.aggregator.recompute(user_id).await
    }
}
