// ABOUTME: Unit normalization from mm, cm, and inch input to canonical millimeters
// ABOUTME: Unrecognized unit tags are rejected earlier, when the tag is parsed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use handfit_core::constants::units::{MM_PER_CM, MM_PER_INCH};
use handfit_core::models::MeasurementUnit;

/// Convert `value` expressed in `unit` to millimeters
#[must_use]
pub fn normalize_to_mm(value: f64, unit: MeasurementUnit) -> f64 {
    match unit {
        MeasurementUnit::Millimeter => value,
        MeasurementUnit::Centimeter => value * MM_PER_CM,
        MeasurementUnit::Inch => value * MM_PER_INCH,
    }
}
