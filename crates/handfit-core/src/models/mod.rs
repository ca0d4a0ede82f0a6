// ABOUTME: Core data models for the Handfit measurement pipeline
// ABOUTME: Re-exports Measurement, UserStats, Recommendation and their request/response shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

//! # Data Models
//!
//! - `Measurement`: a single hand measurement, stored in millimeters
//! - `UserStats`: the recomputable per-user projection over live measurements
//! - `Recommendation`: the on-demand grip and hand-size result, never persisted
//!
//! Wire shapes (`*Request`, `*Response`) serialize as camelCase JSON.

mod measurement;
mod recommendation;
mod stats;

pub use measurement::{
    CreateMeasurementRequest, Measurement, MeasurementListRequest, MeasurementQuality,
    MeasurementResponse, MeasurementSort, MeasurementSortField, MeasurementUnit, QualityFactors,
    QualityLevel, SortOrder, UpdateMeasurementRequest,
};

pub use stats::{HandSize, MeasurementAggregate, MeasurementStatsResponse, UserStats};

pub use recommendation::{DeviceRecommendation, GripType, Recommendation};
