// ABOUTME: Deterministic quality scoring for hand measurements
// ABOUTME: Score starts at a base value, calibration adds a bonus, thresholds pick the level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use handfit_core::constants::quality::{
    BASE_SCORE, CALIBRATION_BONUS, DEFAULT_CONSISTENCY, DEFAULT_STABILITY, HIGH_THRESHOLD,
    LOW_THRESHOLD,
};
use handfit_core::models::{MeasurementQuality, QualityFactors, QualityLevel};

/// Score a measurement from its calibration flag
#[must_use]
pub fn score_quality(calibrated: bool) -> MeasurementQuality {
    let score = if calibrated {
        BASE_SCORE + CALIBRATION_BONUS
    } else {
        BASE_SCORE
    };

    MeasurementQuality {
        score,
        level: quality_level(score),
        factors: QualityFactors {
            calibration: calibrated,
            stability: DEFAULT_STABILITY,
            consistency: DEFAULT_CONSISTENCY,
        },
    }
}

/// Bucket a score into a quality level
///
/// With the current scoring inputs only 70 and 85 are produced, so `Low` is
/// never returned by [`score_quality`]. The branch stays so that new scoring
/// factors are classified correctly.
#[must_use]
pub const fn quality_level(score: i32) -> QualityLevel {
    if score >= HIGH_THRESHOLD {
        QualityLevel::High
    } else if score < LOW_THRESHOLD {
        QualityLevel::Low
    } else {
        QualityLevel::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncalibrated_is_medium() {
        let quality = score_quality(false);
        assert_eq!(quality.score, 70);
        assert_eq!(quality.level, QualityLevel::Medium);
        assert!(!quality.factors.calibration);
    }

    #[test]
    fn test_calibrated_is_high() {
        let quality = score_quality(true);
        assert_eq!(quality.score, 85);
        assert_eq!(quality.level, QualityLevel::High);
        assert!(quality.factors.calibration);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(quality_level(100), QualityLevel::High);
        assert_eq!(quality_level(85), QualityLevel::High);
        assert_eq!(quality_level(84), QualityLevel::Medium);
        assert_eq!(quality_level(60), QualityLevel::Medium);
        assert_eq!(quality_level(59), QualityLevel::Low);
        assert_eq!(quality_level(0), QualityLevel::Low);
    }
}
