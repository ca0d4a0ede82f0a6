// ABOUTME: Measurement record, quality types, units, and list/sort request shapes
// ABOUTME: Stored palm and length values are always millimeters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::units::CANONICAL_UNIT;
use crate::errors::AppError;

/// Input unit tag accepted on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MeasurementUnit {
    /// Millimeters (canonical)
    #[default]
    #[serde(rename = "mm")]
    Millimeter,
    /// Centimeters
    #[serde(rename = "cm")]
    Centimeter,
    /// Inches
    #[serde(rename = "inch")]
    Inch,
}

impl MeasurementUnit {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Inch => "inch",
        }
    }
}

impl FromStr for MeasurementUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(Self::Millimeter),
            "cm" => Ok(Self::Centimeter),
            "inch" => Ok(Self::Inch),
            other => Err(AppError::invalid_format(format!(
                "Unsupported unit '{other}', expected one of: mm, cm, inch"
            ))),
        }
    }
}

impl fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse quality bucket derived from the quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    /// Score below the low threshold
    Low,
    /// Between the low and high thresholds
    Medium,
    /// At or above the high threshold
    High,
}

impl QualityLevel {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Inputs that contributed to a quality score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityFactors {
    /// Whether the measuring device was calibrated
    pub calibration: bool,
    /// Measurement stability, 0.0-1.0
    pub stability: f64,
    /// Agreement with the user's history, 0.0-1.0
    pub consistency: f64,
}

/// Derived quality of a measurement, recomputed on every write that changes calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementQuality {
    /// Quality score, 0-100
    pub score: i32,
    /// Bucket for `score`
    pub level: QualityLevel,
    /// Contributing factors
    pub factors: QualityFactors,
}

/// A single hand measurement owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Palm width in millimeters
    pub palm: f64,
    /// Finger length in millimeters
    pub length: f64,
    /// Free-text label of the measuring device or app
    pub device: Option<String>,
    /// Derived quality
    pub quality: MeasurementQuality,
    /// Soft-delete marker; deleted rows are invisible to every read
    pub deleted: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeasurementRequest {
    /// Palm width in `unit`
    pub palm: f64,
    /// Finger length in `unit`
    pub length: f64,
    /// Unit tag of `palm` and `length` (`mm`, `cm`, `inch`)
    pub unit: String,
    /// Measuring device or app
    #[serde(default)]
    pub device: Option<String>,
    /// Whether the device was calibrated
    #[serde(default)]
    pub calibrated: bool,
}

/// Partial update; only supplied fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeasurementRequest {
    /// New palm width in `unit`
    #[serde(default)]
    pub palm: Option<f64>,
    /// New finger length in `unit`
    #[serde(default)]
    pub length: Option<f64>,
    /// Unit of the supplied values; millimeters when absent
    #[serde(default)]
    pub unit: Option<String>,
    /// New calibration flag; triggers quality recomputation
    #[serde(default)]
    pub calibrated: Option<bool>,
}

/// Query for listing measurements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementListRequest {
    /// 1-indexed page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (1-100)
    #[serde(default)]
    pub page_size: Option<u32>,
    /// `createdAt`, `palm`, `length`, or `quality`
    #[serde(default)]
    pub sort_by: Option<String>,
    /// `asc` or `desc`
    #[serde(default)]
    pub sort_order: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive upper bound (whole day), `YYYY-MM-DD`
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Sortable measurement fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementSortField {
    /// Creation time
    #[default]
    CreatedAt,
    /// Palm width
    Palm,
    /// Finger length
    Length,
    /// Quality score
    Quality,
}

impl FromStr for MeasurementSortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "palm" => Ok(Self::Palm),
            "length" => Ok(Self::Length),
            "quality" => Ok(Self::Quality),
            other => Err(AppError::invalid_format(format!(
                "Unsupported sort field '{other}', expected one of: createdAt, palm, length, quality"
            ))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first
    Asc,
    /// Largest / newest first
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(AppError::invalid_format(format!(
                "Unsupported sort order '{other}', expected asc or desc"
            ))),
        }
    }
}

/// Field and direction for a listing; defaults to newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasurementSort {
    /// Field to order by
    pub field: MeasurementSortField,
    /// Direction
    pub order: SortOrder,
}

/// Outward representation of a measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementResponse {
    /// Measurement ID
    pub id: String,
    /// Palm width
    pub palm: f64,
    /// Finger length
    pub length: f64,
    /// Always the canonical unit
    pub unit: String,
    /// Measuring device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Derived quality
    pub quality: MeasurementQuality,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<&Measurement> for MeasurementResponse {
    fn from(measurement: &Measurement) -> Self {
        Self {
            id: measurement.id.to_string(),
            palm: measurement.palm,
            length: measurement.length,
            unit: CANONICAL_UNIT.to_owned(),
            device: measurement.device.clone(),
            quality: measurement.quality,
            created_at: measurement.created_at,
            updated_at: measurement.updated_at,
        }
    }
}

impl From<Measurement> for MeasurementResponse {
    fn from(measurement: Measurement) -> Self {
        Self::from(&measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parsing() {
        assert_eq!("cm".parse::<MeasurementUnit>().ok(), Some(MeasurementUnit::Centimeter));
        assert_eq!("inch".parse::<MeasurementUnit>().ok(), Some(MeasurementUnit::Inch));
        let error = "furlong".parse::<MeasurementUnit>().err();
        assert!(error.is_some_and(|e| e.is_validation()));
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(
            "quality".parse::<MeasurementSortField>().ok(),
            Some(MeasurementSortField::Quality)
        );
        assert!("created_at".parse::<MeasurementSortField>().is_err());
        assert_eq!("asc".parse::<SortOrder>().ok(), Some(SortOrder::Asc));
        assert_eq!(MeasurementSort::default().order, SortOrder::Desc);
    }
}
