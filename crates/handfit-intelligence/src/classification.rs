// ABOUTME: Hand size and grip style classification with explicit boundary policy
// ABOUTME: Boundaries are exclusive on the outer buckets, so exact boundary values fall inward
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use handfit_core::constants::grip::{CLAW_ABOVE, FINGERTIP_ABOVE};
use handfit_core::constants::hand_size::{LARGE_ABOVE_MM, SMALL_BELOW_MM};
use handfit_core::models::{GripType, HandSize};

/// Classify hand size from the average palm width and the sample count
///
/// `small` below 80 mm, `large` above 95 mm, `medium` otherwise (both
/// boundaries included), `unknown` when there are no measurements.
#[must_use]
pub fn classify_hand_size(average_palm: f64, count: u64) -> HandSize {
    if count == 0 {
        HandSize::Unknown
    } else if average_palm < SMALL_BELOW_MM {
        HandSize::Small
    } else if average_palm > LARGE_ABOVE_MM {
        HandSize::Large
    } else {
        HandSize::Medium
    }
}

/// Length-to-palm ratio used for grip classification
///
/// Returns `None` when the palm width is not positive.
#[must_use]
pub fn grip_ratio(average_palm: f64, average_length: f64) -> Option<f64> {
    (average_palm > 0.0).then(|| average_length / average_palm)
}

/// Classify grip style from the length-to-palm ratio
///
/// `fingertip` above 0.95, `claw` above 0.9 up to and including 0.95,
/// `palm` at or below 0.9.
#[must_use]
pub fn classify_grip(ratio: f64) -> GripType {
    if ratio > FINGERTIP_ABOVE {
        GripType::Fingertip
    } else if ratio > CLAW_ABOVE {
        GripType::Claw
    } else {
        GripType::Palm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_size_boundaries() {
        assert_eq!(classify_hand_size(79.9, 1), HandSize::Small);
        assert_eq!(classify_hand_size(80.0, 1), HandSize::Medium);
        assert_eq!(classify_hand_size(95.0, 1), HandSize::Medium);
        assert_eq!(classify_hand_size(95.1, 1), HandSize::Large);
    }

    #[test]
    fn test_hand_size_without_measurements() {
        assert_eq!(classify_hand_size(0.0, 0), HandSize::Unknown);
        assert_eq!(classify_hand_size(90.0, 0), HandSize::Unknown);
    }

    #[test]
    fn test_grip_boundaries() {
        assert_eq!(classify_grip(0.90), GripType::Palm);
        assert_eq!(classify_grip(0.901), GripType::Claw);
        assert_eq!(classify_grip(0.95), GripType::Claw);
        assert_eq!(classify_grip(0.951), GripType::Fingertip);
    }

    #[test]
    fn test_grip_from_averages() {
        let ratio = grip_ratio(87.5, 72.0);
        assert!(ratio.is_some_and(|r| (r - 0.822_857).abs() < 1e-6));
        assert_eq!(ratio.map(classify_grip), Some(GripType::Palm));

        // 90 / 100 rounds to the same double as the 0.9 literal
        assert_eq!(grip_ratio(100.0, 90.0).map(classify_grip), Some(GripType::Palm));
        assert_eq!(grip_ratio(100.0, 95.0).map(classify_grip), Some(GripType::Claw));
    }

    #[test]
    fn test_grip_ratio_requires_positive_palm() {
        assert!(grip_ratio(0.0, 72.0).is_none());
    }
}
