// ABOUTME: Centralized resource container wiring the store, services, and recompute queue
// ABOUTME: Built once from configuration and shared by binaries and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

//! # Resources
//!
//! Every service shares one store handle and one recompute queue, so
//! `shutdown` can wait for all background work started through them.

use std::sync::Arc;

use tracing::info;

use crate::config::environment::{HandfitConfig, StatsConfig};
use crate::database_plugins::factory::Database;
use crate::database_plugins::MeasurementStore;
use crate::errors::AppResult;
use crate::services::{DeviceCatalog, MeasurementService, RecommendationEngine, StatsAggregator};
use crate::tasks::RecomputeQueue;

/// Shared services over one measurement store
#[derive(Clone)]
pub struct HandfitResources {
    /// Persistence backend
    pub store: Arc<dyn MeasurementStore>,
    /// Synchronous stats recomputation
    pub stats: StatsAggregator,
    /// Background recomputes scheduled by mutations
    pub recompute: RecomputeQueue,
    /// Measurement CRUD
    pub measurements: MeasurementService,
    /// Stats reads and recommendations
    pub recommendations: RecommendationEngine,
}

impl HandfitResources {
    /// Assemble services over an existing store with the empty device catalog
    #[must_use]
    pub fn new(store: Arc<dyn MeasurementStore>, stats_config: &StatsConfig) -> Self {
        let stats = StatsAggregator::new(Arc::clone(&store));
        let recommendations = RecommendationEngine::new(Arc::clone(&store), stats.clone());
        Self::assemble(store, stats, recommendations, stats_config)
    }

    /// Assemble services with a custom device catalog
    #[must_use]
    pub fn with_catalog(
        store: Arc<dyn MeasurementStore>,
        stats_config: &StatsConfig,
        catalog: Arc<dyn DeviceCatalog>,
    ) -> Self {
        let stats = StatsAggregator::new(Arc::clone(&store));
        let recommendations =
            RecommendationEngine::with_catalog(Arc::clone(&store), stats.clone(), catalog);
        Self::assemble(store, stats, recommendations, stats_config)
    }

    /// Connect to the configured database and assemble services
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn from_config(config: &HandfitConfig) -> AppResult<Self> {
        let database = Database::new(&config.database).await?;
        info!(backend = database.backend_info(), "Measurement store ready");
        Ok(Self::new(Arc::new(database), &config.stats))
    }

    /// Wait for every scheduled background recompute to finish
    pub async fn shutdown(&self) {
        let pending = self.recompute.in_flight();
        if pending > 0 {
            info!(pending, "Waiting for background stats recomputes");
        }
        self.recompute.drain().await;
    }

    fn assemble(
        store: Arc<dyn MeasurementStore>,
        stats: StatsAggregator,
        recommendations: RecommendationEngine,
        stats_config: &StatsConfig,
    ) -> Self {
        let recompute = RecomputeQueue::new(stats.clone(), stats_config.recompute_timeout);
        let measurements = MeasurementService::new(Arc::clone(&store), recompute.clone());
        Self {
            store,
            stats,
            recompute,
            measurements,
            recommendations,
        }
    }
}
