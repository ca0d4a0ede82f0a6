// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory stores, and measurement fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `handfit`

use std::sync::{Arc, Once};

use anyhow::Result;
use chrono::{DateTime, Utc};
use handfit::config::database::DatabaseConfig;
use handfit::config::environment::StatsConfig;
use handfit::database_plugins::factory::Database;
use handfit::database_plugins::MeasurementStore;
use handfit::models::{
    CreateMeasurementRequest, Measurement, MeasurementQuality, QualityFactors, QualityLevel,
};
use handfit::resources::HandfitResources;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh, migrated in-memory database
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Database::new(&DatabaseConfig::in_memory()).await?;
    Ok(Arc::new(database))
}

/// Services over a fresh in-memory database
pub async fn create_test_resources() -> Result<HandfitResources> {
    let database = create_test_database().await?;
    Ok(HandfitResources::new(database, &StatsConfig::default()))
}

/// Services over an arbitrary store
pub fn resources_with_store(store: Arc<dyn MeasurementStore>) -> HandfitResources {
    init_test_logging();
    HandfitResources::new(store, &StatsConfig::default())
}

/// A random caller id in the string form the services accept
pub fn new_user_id() -> String {
    Uuid::new_v4().to_string()
}

/// Millimeter create request
pub fn mm_request(palm: f64, length: f64, calibrated: bool) -> CreateMeasurementRequest {
    CreateMeasurementRequest {
        palm,
        length,
        unit: "mm".to_owned(),
        device: None,
        calibrated,
    }
}

/// A stored measurement built directly, bypassing the service
pub fn stored_measurement(
    user_id: Uuid,
    palm: f64,
    length: f64,
    created_at: DateTime<Utc>,
) -> Measurement {
    Measurement {
        id: Uuid::new_v4(),
        user_id,
        palm,
        length,
        device: None,
        quality: MeasurementQuality {
            score: 70,
            level: QualityLevel::Medium,
            factors: QualityFactors {
                calibration: false,
                stability: 1.0,
                consistency: 1.0,
            },
        },
        deleted: false,
        created_at,
        updated_at: created_at,
    }
}

/// Float comparison for values that went through unit conversion
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
