// ABOUTME: Command modules for handfit-cli
// ABOUTME: Measurement CRUD commands plus stats and recommendation reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

pub mod measurement;
pub mod profile;

use handfit::errors::AppResult;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
