// ABOUTME: Measurement intelligence engine for the Handfit platform
// ABOUTME: Deterministic, side-effect free building blocks of the measurement pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

#![deny(unsafe_code)]

//! # Handfit Intelligence
//!
//! Pure functions used by the measurement services:
//!
//! - **units**: conversion of input values to canonical millimeters
//! - **quality**: quality score and level from measurement metadata
//! - **classification**: hand size from average palm width, grip style from
//!   the length-to-palm ratio
//! - **stats**: projection of a grouped aggregate into a `UserStats` row
//!
//! Nothing here touches storage, so every function is referentially transparent.

/// Hand size and grip style classifiers
pub mod classification;

/// Quality scoring
pub mod quality;

/// `UserStats` projection from grouped aggregates
pub mod stats;

/// Unit normalization
pub mod units;

pub use classification::{classify_grip, classify_hand_size, grip_ratio};
pub use quality::{quality_level, score_quality};
pub use stats::project_user_stats;
pub use units::normalize_to_mm;
