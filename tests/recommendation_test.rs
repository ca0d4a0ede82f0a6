// ABOUTME: Integration tests for the Recommendation Engine
// ABOUTME: Grip classification from stored averages, insufficient data, and the device catalog hook
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use common::{assert_close, create_test_database, create_test_resources, mm_request, new_user_id};
use handfit::config::environment::StatsConfig;
use handfit::errors::{AppResult, ErrorCode};
use handfit::models::{DeviceRecommendation, GripType, HandSize, UserStats};
use handfit::resources::HandfitResources;
use handfit::services::DeviceCatalog;

async fn record(resources: &HandfitResources, user_id: &str, palm: f64, length: f64) -> Result<()> {
    resources
        .measurements
        .create(user_id, mm_request(palm, length, false))
        .await?;
    resources.recompute.drain().await;
    Ok(())
}

#[tokio::test]
async fn test_palm_grip_from_averages() -> Result<()> {
    let resources = create_test_resources().await?;
    let user_id = new_user_id();

    record(&resources, &user_id, 85.0, 70.0).await?;
    record(&resources, &user_id, 90.0, 74.0).await?;

    let recommendation = resources.recommendations.get_recommendations(&user_id).await?;
    assert_close(recommendation.palm, 87.5);
    assert_close(recommendation.length, 72.0);
    assert_eq!(recommendation.grip_type, GripType::Palm);
    assert_eq!(recommendation.hand_size, HandSize::Medium);
    assert!(recommendation.devices.is_empty());

    let json = serde_json::to_value(&recommendation)?;
    assert_eq!(json["gripType"], "palm");
    assert_eq!(json["handSize"], "medium");
    Ok(())
}

#[tokio::test]
async fn test_claw_and_fingertip_grips() -> Result<()> {
    let resources = create_test_resources().await?;

    let claw_user = new_user_id();
    record(&resources, &claw_user, 100.0, 92.0).await?;
    let claw = resources.recommendations.get_recommendations(&claw_user).await?;
    assert_eq!(claw.grip_type, GripType::Claw);
    assert_eq!(claw.hand_size, HandSize::Large);

    let fingertip_user = new_user_id();
    record(&resources, &fingertip_user, 75.0, 75.0).await?;
    let fingertip = resources
        .recommendations
        .get_recommendations(&fingertip_user)
        .await?;
    assert_eq!(fingertip.grip_type, GripType::Fingertip);
    assert_eq!(fingertip.hand_size, HandSize::Small);
    Ok(())
}

#[tokio::test]
async fn test_insufficient_data_without_measurements() -> Result<()> {
    let resources = create_test_resources().await?;
    let user_id = new_user_id();

    let error = resources
        .recommendations
        .get_recommendations(&user_id)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InsufficientData);
    assert!(error.is_validation());
    assert!(!error.is_internal());

    // The miss still cached an empty stats row
    let stats = resources.recommendations.get_user_stats(&user_id).await?;
    assert_eq!(stats.measurement_count, 0);
    assert_eq!(stats.hand_size, HandSize::Unknown);
    Ok(())
}

#[tokio::test]
async fn test_insufficient_data_after_all_deleted() -> Result<()> {
    let resources = create_test_resources().await?;
    let user_id = new_user_id();

    let measurement = resources
        .measurements
        .create(&user_id, mm_request(88.0, 80.0, true))
        .await?;
    resources.recompute.drain().await;
    assert!(resources
        .recommendations
        .get_recommendations(&user_id)
        .await
        .is_ok());

    resources
        .measurements
        .delete(&user_id, &measurement.id.to_string())
        .await?;
    resources.recompute.drain().await;

    let error = resources
        .recommendations
        .get_recommendations(&user_id)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InsufficientData);
    Ok(())
}

struct RecordingCatalog {
    seen: Mutex<Vec<(u64, GripType)>>,
    match_score: u8,
}

impl Default for RecordingCatalog {
    fn default() -> Self {
        Self {
            seen: Mutex::default(),
            match_score: 92,
        }
    }
}

#[async_trait]
impl DeviceCatalog for RecordingCatalog {
    async fn recommend(
        &self,
        stats: &UserStats,
        grip: GripType,
    ) -> AppResult<Vec<DeviceRecommendation>> {
        self.seen
            .lock()
            .unwrap()
            .push((stats.measurement_count, grip));
        Ok(vec![DeviceRecommendation {
            id: "m-1".to_owned(),
            name: "Ergo One".to_owned(),
            brand: "Acme".to_owned(),
            match_score: self.match_score,
            reason: format!("Shaped for a {} grip", grip.as_str()),
        }])
    }
}

#[tokio::test]
async fn test_device_catalog_results_are_embedded() -> Result<()> {
    let database = create_test_database().await?;
    let catalog = Arc::new(RecordingCatalog::default());
    let resources =
        HandfitResources::with_catalog(database, &StatsConfig::default(), catalog.clone());
    let user_id = new_user_id();

    record(&resources, &user_id, 80.0, 74.0).await?;
    let recommendation = resources.recommendations.get_recommendations(&user_id).await?;

    assert_eq!(recommendation.grip_type, GripType::Claw);
    assert_eq!(recommendation.devices.len(), 1);
    assert_eq!(recommendation.devices[0].reason, "Shaped for a claw grip");
    assert_eq!(*catalog.seen.lock().unwrap(), vec![(1, GripType::Claw)]);
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_catalog_score_is_internal_error() -> Result<()> {
    let database = create_test_database().await?;
    let catalog = Arc::new(RecordingCatalog {
        match_score: 140,
        ..RecordingCatalog::default()
    });
    let resources = HandfitResources::with_catalog(database, &StatsConfig::default(), catalog);
    let user_id = new_user_id();

    record(&resources, &user_id, 80.0, 74.0).await?;
    let error = resources
        .recommendations
        .get_recommendations(&user_id)
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InternalError);
    assert!(error.is_internal());
    Ok(())
}
