// ABOUTME: Tests for the file-backed SQLite measurement store
// ABOUTME: Data and cached stats survive reopening the database from the same path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{init_test_logging, mm_request, new_user_id};
use handfit::config::database::{DatabaseConfig, DatabaseUrl};
use handfit::config::environment::{HandfitConfig, StatsConfig};
use handfit::database_plugins::factory::Database;
use handfit::database_plugins::MeasurementStore;
use handfit::resources::HandfitResources;
use tempfile::TempDir;
use uuid::Uuid;

fn file_config(dir: &TempDir) -> HandfitConfig {
    HandfitConfig {
        database: DatabaseConfig {
            url: DatabaseUrl::SQLite {
                path: dir.path().join("nested").join("handfit.db"),
            },
            auto_migrate: true,
            max_connections: 2,
        },
        stats: StatsConfig::default(),
        ..HandfitConfig::default()
    }
}

#[tokio::test]
async fn test_measurements_persist_across_reopen() -> Result<()> {
    init_test_logging();
    let dir = TempDir::new()?;
    let config = file_config(&dir);
    let user_id = new_user_id();

    let measurement = {
        let resources = HandfitResources::from_config(&config).await?;
        let measurement = resources
            .measurements
            .create(&user_id, mm_request(92.0, 81.0, true))
            .await?;
        resources.shutdown().await;
        measurement
    };
    assert!(dir.path().join("nested").join("handfit.db").exists());

    let reopened = HandfitResources::from_config(&config).await?;
    let stored = reopened
        .measurements
        .get(&user_id, &measurement.id.to_string())
        .await?;
    assert_eq!(stored, measurement);

    let stats = reopened
        .store
        .find_user_stats(Uuid::parse_str(&user_id)?)
        .await?
        .unwrap();
    assert_eq!(stats.measurement_count, 1);
    assert_eq!(stats.last_measured_at, Some(measurement.created_at));
    Ok(())
}

#[tokio::test]
async fn test_migrate_is_repeatable() -> Result<()> {
    init_test_logging();
    let dir = TempDir::new()?;
    let config = file_config(&dir);

    let database = Database::new(&config.database).await?;
    database.migrate().await?;
    database.migrate().await?;
    assert_eq!(database.backend_name(), "sqlite");
    Ok(())
}
