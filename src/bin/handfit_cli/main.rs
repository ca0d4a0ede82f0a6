// ABOUTME: Handfit CLI - operator tool for measurements, stats, and recommendations
// ABOUTME: Runs the measurement services against a configured database and prints JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors
//!
//! Usage:
//! ```bash
//! # Record a calibrated measurement in centimeters
//! handfit-cli measurement create --user-id $USER_ID --palm 8.55 --length 7.02 --unit cm --calibrated
//!
//! # Newest measurements first, 10 per page
//! handfit-cli measurement list --user-id $USER_ID --page-size 10
//!
//! # Soft delete
//! handfit-cli measurement delete --user-id $USER_ID --id $MEASUREMENT_ID
//!
//! # Cached stats and grip recommendation
//! handfit-cli stats --user-id $USER_ID
//! handfit-cli recommend --user-id $USER_ID
//! ```

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use handfit::config::environment::HandfitConfig;
use handfit::errors::{AppError, AppResult, ErrorResponse};
use handfit::resources::HandfitResources;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "handfit-cli",
    about = "Handfit measurement CLI",
    long_about = "Record hand measurements, inspect per-user statistics, and get grip recommendations."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override (defaults to `DATABASE_URL`)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Measurement management
    Measurement {
        #[command(subcommand)]
        action: commands::measurement::MeasurementCommand,
    },

    /// Show cached statistics, computing them if missing
    Stats {
        /// Owning user ID
        #[arg(long)]
        user_id: String,
    },

    /// Show hand size and grip recommendation
    Recommend {
        /// Owning user ID
        #[arg(long)]
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let response = ErrorResponse::from(error);
            match serde_json::to_string_pretty(&response) {
                Ok(body) => eprintln!("{body}"),
                Err(_) => eprintln!("{}", response.error.message),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = HandfitConfig::from_env_with_database_url(cli.database_url.as_deref())?;

    let logging = if cli.verbose {
        config.logging.clone().with_level("debug")
    } else {
        config.logging.clone()
    };
    logging
        .init()
        .map_err(|e| AppError::config(format!("Failed to initialize logging: {e}")))?;

    info!("{}", config.summary());
    let resources = HandfitResources::from_config(&config).await?;

    let result = match cli.command {
        Command::Measurement { action } => commands::measurement::run(&resources, action).await,
        Command::Stats { user_id } => commands::profile::stats(&resources, &user_id).await,
        Command::Recommend { user_id } => commands::profile::recommend(&resources, &user_id).await,
    };

    resources.shutdown().await;
    result
}
