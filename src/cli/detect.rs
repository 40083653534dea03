// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Detect command - is this a Cargo project?

use miette::Result;
use std::path::PathBuf;

use crate::supply::{AppLayout, BUILDPACK_NAME};

/// Run the detect command
pub async fn run(build_dir: PathBuf, _verbose: bool) -> Result<()> {
    let layout = AppLayout::detect(&build_dir)?;

    if !layout.has_cargo_toml {
        return Err(miette::miette!(
            "No Cargo.toml found in {}",
            build_dir.display()
        ));
    }

    println!("{}", BUILDPACK_NAME);
    Ok(())
}
