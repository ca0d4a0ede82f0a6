// ABOUTME: Measurement subcommands for handfit-cli
// ABOUTME: Maps clap arguments onto MeasurementService requests and prints responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use clap::Subcommand;
use handfit::errors::AppResult;
use handfit::models::{
    CreateMeasurementRequest, MeasurementListRequest, MeasurementResponse,
    UpdateMeasurementRequest,
};
use handfit::resources::HandfitResources;
use serde_json::json;

use super::print_json;

#[derive(Subcommand)]
pub enum MeasurementCommand {
    /// Record a new measurement
    Create {
        /// Owning user ID
        #[arg(long)]
        user_id: String,

        /// Palm width in `unit`
        #[arg(long)]
        palm: f64,

        /// Finger length in `unit`
        #[arg(long)]
        length: f64,

        /// mm, cm, or inch
        #[arg(long, default_value = "mm")]
        unit: String,

        /// Measuring device or app
        #[arg(long)]
        device: Option<String>,

        /// The device was calibrated
        #[arg(long)]
        calibrated: bool,
    },

    /// Show one measurement
    Get {
        /// Owning user ID
        #[arg(long)]
        user_id: String,

        /// Measurement ID
        #[arg(long)]
        id: String,
    },

    /// List measurements, newest first by default
    List {
        /// Owning user ID
        #[arg(long)]
        user_id: String,

        /// Page number, starting at 1
        #[arg(long)]
        page: Option<u32>,

        /// Items per page (1-100)
        #[arg(long)]
        page_size: Option<u32>,

        /// createdAt, palm, length, or quality
        #[arg(long)]
        sort_by: Option<String>,

        /// asc or desc
        #[arg(long)]
        sort_order: Option<String>,

        /// First day to include, YYYY-MM-DD
        #[arg(long)]
        start_date: Option<String>,

        /// Last day to include, YYYY-MM-DD
        #[arg(long)]
        end_date: Option<String>,
    },

    /// Change selected fields of a measurement
    Update {
        /// Owning user ID
        #[arg(long)]
        user_id: String,

        /// Measurement ID
        #[arg(long)]
        id: String,

        /// New palm width in `unit`
        #[arg(long)]
        palm: Option<f64>,

        /// New finger length in `unit`
        #[arg(long)]
        length: Option<f64>,

        /// Unit of the new values (mm when omitted)
        #[arg(long)]
        unit: Option<String>,

        /// New calibration flag
        #[arg(long)]
        calibrated: Option<bool>,
    },

    /// Soft delete a measurement
    Delete {
        /// Owning user ID
        #[arg(long)]
        user_id: String,

        /// Measurement ID
        #[arg(long)]
        id: String,
    },
}

pub async fn run(resources: &HandfitResources, command: MeasurementCommand) -> AppResult<()> {
    let service = &resources.measurements;

    match command {
        MeasurementCommand::Create {
            user_id,
            palm,
            length,
            unit,
            device,
            calibrated,
        } => {
            let request = CreateMeasurementRequest {
                palm,
                length,
                unit,
                device,
                calibrated,
            };
            let measurement = service.create(&user_id, request).await?;
            print_json(&MeasurementResponse::from(measurement))
        }
        MeasurementCommand::Get { user_id, id } => {
            let measurement = service.get(&user_id, &id).await?;
            print_json(&MeasurementResponse::from(measurement))
        }
        MeasurementCommand::List {
            user_id,
            page,
            page_size,
            sort_by,
            sort_order,
            start_date,
            end_date,
        } => {
            let request = MeasurementListRequest {
                page,
                page_size,
                sort_by,
                sort_order,
                start_date,
                end_date,
            };
            let page = service.list(&user_id, &request).await?;
            print_json(&page.map(MeasurementResponse::from))
        }
        MeasurementCommand::Update {
            user_id,
            id,
            palm,
            length,
            unit,
            calibrated,
        } => {
            let request = UpdateMeasurementRequest {
                palm,
                length,
                unit,
                calibrated,
            };
            let measurement = service.update(&user_id, &id, request).await?;
            print_json(&MeasurementResponse::from(measurement))
        }
        MeasurementCommand::Delete { user_id, id } => {
            service.delete(&user_id, &id).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}
