// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Buildpack configuration
//!
//! Defines the schema for the optional `rust-buildpack.yml` an app can
//! ship in its root directory.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{SupplyError, SupplyResult};

/// File name looked up in the build directory
pub const CONFIG_FILE: &str = "rust-buildpack.yml";

/// Default location of the rustup installer script
pub const DEFAULT_RUSTUP_URL: &str = "https://sh.rustup.rs";

/// Buildpack configuration from rust-buildpack.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildpackConfig {
    /// Where to download the rustup installer from
    #[serde(default = "default_rustup_url")]
    pub rustup_url: String,

    /// Build with `--release`
    #[serde(default = "default_release")]
    pub release: bool,

    /// Extra arguments for `cargo build`
    #[serde(default)]
    pub cargo_args: Vec<String>,

    /// Install the toolchain only
    #[serde(default)]
    pub skip_compile: bool,
}

fn default_rustup_url() -> String {
    DEFAULT_RUSTUP_URL.to_string()
}

fn default_release() -> bool {
    true
}

impl Default for BuildpackConfig {
    fn default() -> Self {
        Self {
            rustup_url: default_rustup_url(),
            release: default_release(),
            cargo_args: Vec::new(),
            skip_compile: false,
        }
    }
}

impl BuildpackConfig {
    /// Load from `build_dir`, falling back to defaults when there is no file
    pub fn load(build_dir: &Path) -> SupplyResult<Self> {
        let path = build_dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| SupplyError::FileReadError {
            path: path.clone(),
            error: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> SupplyResult<Self> {
        // An empty file deserializes as null rather than an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Into::into)
    }
}
