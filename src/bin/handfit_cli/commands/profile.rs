// ABOUTME: Stats and recommendation subcommands for handfit-cli
// ABOUTME: Reads through the Recommendation Engine so missing stats are computed on demand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use handfit::errors::AppResult;
use handfit::models::MeasurementStatsResponse;
use handfit::resources::HandfitResources;

use super::print_json;

pub async fn stats(resources: &HandfitResources, user_id: &str) -> AppResult<()> {
    let stats = resources.recommendations.get_user_stats(user_id).await?;
    print_json(&MeasurementStatsResponse::from(&stats))
}

pub async fn recommend(resources: &HandfitResources, user_id: &str) -> AppResult<()> {
    let recommendation = resources.recommendations.get_recommendations(user_id).await?;
    print_json(&recommendation)
}
