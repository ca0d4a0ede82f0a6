// ABOUTME: Grip style classification result and device recommendation shapes
// ABOUTME: Recommendations are computed on demand from UserStats and never persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use serde::{Deserialize, Serialize};

use super::HandSize;

/// How a hand holds a device, derived from the length-to-palm ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GripType {
    /// Whole palm rests on the device
    Palm,
    /// Arched fingers, palm partly in contact
    Claw,
    /// Only fingertips touch the device
    Fingertip,
}

impl GripType {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Palm => "palm",
            Self::Claw => "claw",
            Self::Fingertip => "fingertip",
        }
    }
}

/// A single device suggested for a hand profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecommendation {
    /// Device identifier
    pub id: String,
    /// Device name
    pub name: String,
    /// Manufacturer
    pub brand: String,
    /// Match quality, 0-100
    pub match_score: u8,
    /// Why the device fits
    pub reason: String,
}

/// Hand profile and the devices that suit it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Average palm width (mm)
    pub palm: f64,
    /// Average finger length (mm)
    pub length: f64,
    /// Hand size bucket
    pub hand_size: HandSize,
    /// Grip style
    pub grip_type: GripType,
    /// Suggested devices
    pub devices: Vec<DeviceRecommendation>,
}
