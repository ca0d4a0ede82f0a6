// ABOUTME: Re-exports the unified error types from handfit-core
// ABOUTME: Keeps `handfit::errors::*` paths stable for binaries and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

pub use handfit_core::errors::*;
