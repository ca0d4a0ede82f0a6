// ABOUTME: Core types and constants for the Handfit measurement platform
// ABOUTME: Foundation crate with error handling, domain models, pagination, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

#![deny(unsafe_code)]

//! # Handfit Core
//!
//! Foundation crate providing shared types and constants for the Handfit hand
//! measurement platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Thresholds, limits, and table names organized by domain
//! - **pagination**: 1-indexed page requests and page results
//! - **models**: Measurements, per-user statistics, and recommendations

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Page-based pagination for measurement listings
pub mod pagination;

/// Core data models (Measurement, `UserStats`, Recommendation)
pub mod models;
