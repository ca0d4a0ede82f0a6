// ABOUTME: Tests for failure isolation in the background recompute queue
// ABOUTME: Store doubles fail, panic, or stall during recompute while mutations still succeed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use common::{create_test_database, mm_request, new_user_id, resources_with_store};
use handfit::config::environment::StatsConfig;
use handfit::database_plugins::factory::Database;
use handfit::database_plugins::{MeasurementFilter, MeasurementPatch, MeasurementStore};
use handfit::errors::DatabaseError;
use handfit::models::{
    Measurement, MeasurementAggregate, MeasurementListRequest, MeasurementSort, UserStats,
};
use handfit::pagination::PageRequest;
use handfit::resources::HandfitResources;
use tokio::time::Instant;
use uuid::Uuid;

#[derive(Clone, Copy)]
enum Fault {
    FailUpsert,
    PanicOnAggregate,
    StallAggregate,
}

/// Delegates to a real database but sabotages the stats path
struct FaultyStore {
    inner: Arc<Database>,
    fault: Fault,
    upsert_attempts: AtomicUsize,
}

impl FaultyStore {
    async fn new(fault: Fault) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            inner: create_test_database().await?,
            fault,
            upsert_attempts: AtomicUsize::new(0),
        }))
    }
}

#[async_trait]
impl MeasurementStore for FaultyStore {
    fn backend_name(&self) -> &'static str {
        "faulty"
    }

    async fn migrate(&self) -> Result<(), DatabaseError> {
        self.inner.migrate().await
    }

    async fn insert_measurement(&self, measurement: &Measurement) -> Result<(), DatabaseError> {
        self.inner.insert_measurement(measurement).await
    }

    async fn find_measurement(
        &self,
        filter: &MeasurementFilter,
    ) -> Result<Option<Measurement>, DatabaseError> {
        self.inner.find_measurement(filter).await
    }

    async fn find_measurements(
        &self,
        filter: &MeasurementFilter,
        sort: MeasurementSort,
        page: PageRequest,
    ) -> Result<Vec<Measurement>, DatabaseError> {
        self.inner.find_measurements(filter, sort, page).await
    }

    async fn count_measurements(&self, filter: &MeasurementFilter) -> Result<u64, DatabaseError> {
        self.inner.count_measurements(filter).await
    }

    async fn update_measurement(
        &self,
        filter: &MeasurementFilter,
        patch: &MeasurementPatch,
    ) -> Result<u64, DatabaseError> {
        self.inner.update_measurement(filter, patch).await
    }

    async fn aggregate_measurements(
        &self,
        filter: &MeasurementFilter,
    ) -> Result<Option<MeasurementAggregate>, DatabaseError> {
        match self.fault {
            Fault::PanicOnAggregate => panic!("aggregate exploded"),
            Fault::StallAggregate => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                self.inner.aggregate_measurements(filter).await
            }
            Fault::FailUpsert => self.inner.aggregate_measurements(filter).await,
        }
    }

    async fn find_user_stats(&self, user_id: Uuid) -> Result<Option<UserStats>, DatabaseError> {
        self.inner.find_user_stats(user_id).await
    }

    async fn upsert_user_stats(&self, stats: &UserStats) -> Result<(), DatabaseError> {
        self.upsert_attempts.fetch_add(1, Ordering::SeqCst);
        match self.fault {
            Fault::FailUpsert => Err(DatabaseError::query("upsert user stats", "disk full")),
            _ => self.inner.upsert_user_stats(stats).await,
        }
    }
}

#[tokio::test]
async fn test_failed_recompute_does_not_fail_create() -> Result<()> {
    let store = FaultyStore::new(Fault::FailUpsert).await?;
    let resources = resources_with_store(store.clone());
    let user_id = new_user_id();

    let measurement = resources
        .measurements
        .create(&user_id, mm_request(85.0, 70.0, false))
        .await?;
    resources.recompute.drain().await;

    assert_eq!(store.upsert_attempts.load(Ordering::SeqCst), 1);
    assert_eq!(resources.recompute.in_flight(), 0);
    let user = Uuid::parse_str(&user_id)?;
    assert!(store.find_user_stats(user).await?.is_none());

    // The measurement itself is committed and readable
    let stored = resources
        .measurements
        .get(&user_id, &measurement.id.to_string())
        .await?;
    assert_eq!(stored.id, measurement.id);

    // A synchronous stats read surfaces the same failure as an internal error
    let error = resources
        .recommendations
        .get_user_stats(&user_id)
        .await
        .unwrap_err();
    assert!(error.is_internal());
    Ok(())
}

#[tokio::test]
async fn test_panicking_recompute_is_contained() -> Result<()> {
    let store = FaultyStore::new(Fault::PanicOnAggregate).await?;
    let resources = resources_with_store(store);
    let user_id = new_user_id();

    let measurement = resources
        .measurements
        .create(&user_id, mm_request(85.0, 70.0, false))
        .await?;
    resources
        .measurements
        .delete(&user_id, &measurement.id.to_string())
        .await?;
    resources.recompute.drain().await;
    assert_eq!(resources.recompute.in_flight(), 0);

    // The service keeps working after the background panics
    let page = resources
        .measurements
        .list(&user_id, &MeasurementListRequest::default())
        .await?;
    assert_eq!(page.total, 0);
    Ok(())
}

#[tokio::test]
async fn test_stalled_recompute_times_out_without_blocking_mutation() -> Result<()> {
    let store = FaultyStore::new(Fault::StallAggregate).await?;
    let config = StatsConfig {
        recompute_timeout: Duration::from_millis(50),
    };
    let resources = HandfitResources::new(store, &config);
    let user_id = new_user_id();

    let started = Instant::now();
    resources
        .measurements
        .create(&user_id, mm_request(85.0, 70.0, false))
        .await?;
    assert_eq!(resources.recompute.in_flight(), 1);

    resources.recompute.drain().await;
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(resources.recompute.in_flight(), 0);
    Ok(())
}

#[tokio::test]
async fn test_drain_with_nothing_scheduled_returns() -> Result<()> {
    let store = FaultyStore::new(Fault::FailUpsert).await?;
    let resources = resources_with_store(store);
    tokio::time::timeout(Duration::from_secs(1), resources.shutdown()).await?;
    Ok(())
}
