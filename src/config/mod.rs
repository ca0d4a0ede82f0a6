// ABOUTME: Configuration module for the Handfit platform
// ABOUTME: Environment-driven settings for the database, background stats, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

/// Database connection settings
pub mod database;

/// Top-level configuration loaded from environment variables
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{HandfitConfig, StatsConfig};
