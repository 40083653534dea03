// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Utility modules
//!
//! Common utilities for the rust-buildpack CLI.

pub mod log;
