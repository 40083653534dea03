// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Supply step
//!
//! Configuration, app detection, the runtime profile script, and the
//! [`Supplier`] that runs the staging phases.

mod config;
mod detect;
mod profile;
mod supplier;

pub use config::{BuildpackConfig, CONFIG_FILE, DEFAULT_RUSTUP_URL};
pub use detect::{
    detect_toolchain, install_suffix, AppLayout, Toolchain, TOOLCHAIN_FILE, TOOLCHAIN_TOML_FILE,
};
pub use profile::{cargo_home, profile_script, rustup_home, PROFILE_SCRIPT};
pub use supplier::{Supplier, BUILDPACK_NAME};
