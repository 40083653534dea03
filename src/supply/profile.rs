// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Runtime environment script

use std::path::{Path, PathBuf};

/// Name of the script written into `.profile.d`
pub const PROFILE_SCRIPT: &str = "rust.sh";

/// `CARGO_HOME` under a dependency directory
pub fn cargo_home(dep_dir: &Path) -> PathBuf {
    dep_dir.join("cargo")
}

/// `RUSTUP_HOME` under a dependency directory
pub fn rustup_home(dep_dir: &Path) -> PathBuf {
    dep_dir.join("rustup")
}

/// Render the script that puts the toolchain on `PATH` at runtime
///
/// Paths go through `$DEPS_DIR` because the staging location differs
/// from where the droplet is unpacked.
pub fn profile_script(deps_idx: &str) -> String {
    format!(
        "export CARGO_HOME=\"$DEPS_DIR/{idx}/cargo\"\n\
         export RUSTUP_HOME=\"$DEPS_DIR/{idx}/rustup\"\n\
         export PATH=\"$CARGO_HOME/bin:$PATH\"\n",
        idx = deps_idx
    )
}
