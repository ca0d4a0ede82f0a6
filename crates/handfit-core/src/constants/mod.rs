// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Conversion factors, scoring thresholds, classification boundaries, and limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

//! Constants module
//!
//! Constants are grouped by the pipeline stage that consumes them so a change
//! to a threshold is made in exactly one place.

/// Unit conversion constants
pub mod units {
    /// Millimeters per centimeter
    pub const MM_PER_CM: f64 = 10.0;
    /// Millimeters per inch
    pub const MM_PER_INCH: f64 = 25.4;
    /// Tag of the canonical storage unit
    pub const CANONICAL_UNIT: &str = "mm";
}

/// Measurement quality scoring
pub mod quality {
    /// Score every measurement starts from
    pub const BASE_SCORE: i32 = 70;
    /// Added when the measuring device was calibrated
    pub const CALIBRATION_BONUS: i32 = 15;
    /// Scores at or above this are `high`
    pub const HIGH_THRESHOLD: i32 = 85;
    /// Scores below this are `low`
    pub const LOW_THRESHOLD: i32 = 60;
    /// Recorded stability factor (no stability signal is collected yet)
    pub const DEFAULT_STABILITY: f64 = 1.0;
    /// Recorded consistency factor (no consistency signal is collected yet)
    pub const DEFAULT_CONSISTENCY: f64 = 1.0;
}

/// Hand size classification boundaries (average palm width, mm)
pub mod hand_size {
    /// Averages strictly below this are `small`
    pub const SMALL_BELOW_MM: f64 = 80.0;
    /// Averages strictly above this are `large`
    pub const LARGE_ABOVE_MM: f64 = 95.0;
}

/// Grip style classification boundaries (length / palm ratio)
pub mod grip {
    /// Ratios strictly above this are `fingertip`
    pub const FINGERTIP_ABOVE: f64 = 0.95;
    /// Ratios strictly above this (and not fingertip) are `claw`
    pub const CLAW_ABOVE: f64 = 0.9;
}

/// Accepted measurement ranges, in millimeters after normalization
pub mod limits {
    /// Smallest accepted palm width
    pub const PALM_MIN_MM: f64 = 50.0;
    /// Largest accepted palm width
    pub const PALM_MAX_MM: f64 = 150.0;
    /// Smallest accepted finger length
    pub const LENGTH_MIN_MM: f64 = 40.0;
    /// Largest accepted finger length
    pub const LENGTH_MAX_MM: f64 = 120.0;
}

/// Pagination defaults
pub mod pagination {
    /// First page (pages are 1-indexed)
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size when none or an invalid one is requested
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    /// Largest page size a caller may request
    pub const MAX_PAGE_SIZE: u32 = 100;
}

/// Database table names
pub mod tables {
    /// Individual measurement records
    pub const MEASUREMENTS: &str = "measurements";
    /// Per-user statistics projection
    pub const USER_STATS: &str = "measurement_user_stats";
}

/// Service identifiers used in structured logs
pub mod service_names {
    /// Default service name
    pub const HANDFIT: &str = "handfit";
}

/// Background recompute defaults
pub mod stats {
    /// Upper bound on a single background recompute, in seconds
    pub const DEFAULT_RECOMPUTE_TIMEOUT_SECS: u64 = 30;
}
