// ABOUTME: Main library entry point for the Handfit measurement platform
// ABOUTME: Wires persistence, measurement services, background stats, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

#![deny(unsafe_code)]

//! # Handfit
//!
//! Hand measurement intake and grip-style recommendation.
//!
//! Raw palm and finger-length samples are normalized to millimeters, scored for
//! quality, and persisted per user. Every mutation schedules a background
//! recompute of the user's statistics, and recommendations are derived from
//! those statistics on demand.
//!
//! ## Architecture
//!
//! - **`database_plugins`**: `MeasurementStore` trait and the `SQLite` backend
//! - **services**: Measurement Store, Stats Aggregator, Recommendation Engine
//! - **tasks**: detached background recompute queue
//! - **resources**: one place that assembles the services from configuration
//! - **config** / **logging**: environment-driven configuration and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use handfit::config::environment::HandfitConfig;
//! use handfit::errors::AppResult;
//! use handfit::resources::HandfitResources;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = HandfitConfig::from_env()?;
//!     let resources = HandfitResources::from_config(&config).await?;
//!
//!     let stats = resources.recommendations.get_user_stats("5f0c6a52-51f4-4c39-9f46-4e4f7b0c1e21").await?;
//!     println!("{} measurements", stats.measurement_count);
//!
//!     resources.shutdown().await;
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Pluggable measurement persistence
pub mod database_plugins;

/// Unified error handling (re-exported from `handfit-core`)
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Service assembly from configuration
pub mod resources;

/// Measurement, statistics, and recommendation services
pub mod services;

/// Background work spawned by mutations
pub mod tasks;

pub use handfit_core::{constants, models, pagination};
