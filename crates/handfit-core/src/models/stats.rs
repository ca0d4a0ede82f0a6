// ABOUTME: Per-user measurement statistics projection and hand size classification
// ABOUTME: UserStats is derived state, always re-derivable from live measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse hand size bucket derived from the average palm width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandSize {
    /// Below the small boundary
    Small,
    /// Between the boundaries, inclusive
    Medium,
    /// Above the large boundary
    Large,
    /// No measurements
    Unknown,
}

impl HandSize {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Unknown => "unknown",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Grouped mean/count/max over a user's live measurements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementAggregate {
    /// Mean palm width (mm)
    pub average_palm: f64,
    /// Mean finger length (mm)
    pub average_length: f64,
    /// Number of live measurements
    pub count: u64,
    /// Latest `created_at`
    pub last_measured_at: Option<DateTime<Utc>>,
}

/// Cached per-user statistics, replaced wholesale on every recompute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Owning user
    pub user_id: Uuid,
    /// Mean palm width (mm), 0 without measurements
    pub average_palm: f64,
    /// Mean finger length (mm), 0 without measurements
    pub average_length: f64,
    /// Classification of `average_palm`
    pub hand_size: HandSize,
    /// Number of live measurements
    pub measurement_count: u64,
    /// Latest measurement creation time, `None` without measurements
    pub last_measured_at: Option<DateTime<Utc>>,
    /// Time of the recompute that produced this row
    pub updated_at: DateTime<Utc>,
}

impl UserStats {
    /// Whether the stats carry enough data to classify grip
    #[must_use]
    pub fn has_usable_data(&self) -> bool {
        self.measurement_count > 0 && self.average_palm > 0.0 && self.average_length > 0.0
    }
}

/// Outward representation of [`UserStats`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementStatsResponse {
    /// Mean palm width (mm)
    pub average_palm: f64,
    /// Mean finger length (mm)
    pub average_length: f64,
    /// Hand size bucket
    pub hand_size: HandSize,
    /// Number of live measurements
    pub measurement_count: u64,
    /// Latest measurement creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_measured_at: Option<DateTime<Utc>>,
}

impl From<&UserStats> for MeasurementStatsResponse {
    fn from(stats: &UserStats) -> Self {
        Self {
            average_palm: stats.average_palm,
            average_length: stats.average_length,
            hand_size: stats.hand_size,
            measurement_count: stats.measurement_count,
            last_measured_at: stats.last_measured_at,
        }
    }
}
