// ABOUTME: Domain service layer for measurements, statistics, and recommendations
// ABOUTME: Parses opaque caller identifiers and maps persistence failures to typed errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

//! Domain service layer
//!
//! Services take caller identifiers as opaque strings and return plain
//! records or [`AppError`]s, so any request-handling layer can sit on top.

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Measurement CRUD with soft delete, scoped per owner
pub mod measurements;

/// Cached-stats lookup and grip/hand-size recommendations
pub mod recommendations;

/// Per-user statistics recomputation
pub mod stats;

pub use measurements::MeasurementService;
pub use recommendations::{DeviceCatalog, EmptyDeviceCatalog, RecommendationEngine};
pub use stats::StatsAggregator;

/// Parse the authenticated caller's id
///
/// # Errors
///
/// `AUTH_REQUIRED` when blank, `INVALID_FORMAT` when not a UUID
pub fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::auth_required());
    }
    Uuid::parse_str(trimmed)
        .map_err(|_| AppError::invalid_format(format!("Invalid user ID: {trimmed}")))
}

/// Parse a measurement id supplied by the caller
///
/// # Errors
///
/// `INVALID_FORMAT` when not a UUID
pub fn parse_measurement_id(raw: &str) -> AppResult<Uuid> {
    let trimmed = raw.trim();
    Uuid::parse_str(trimmed)
        .map_err(|_| AppError::invalid_format(format!("Invalid measurement ID: {trimmed}")))
}

/// Current time at the precision the store keeps
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
