// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! App layout and toolchain detection

use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::errors::{SupplyError, SupplyResult};

/// Legacy toolchain file, plain text or TOML
pub const TOOLCHAIN_FILE: &str = "rust-toolchain";

/// TOML toolchain file
pub const TOOLCHAIN_TOML_FILE: &str = "rust-toolchain.toml";

/// What a rustup toolchain name may contain; anything else would split
/// or inject into the installer command line.
const TOOLCHAIN_PATTERN: &str = r"^[A-Za-z0-9._+-]+$";

/// Which Cargo files the app ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppLayout {
    pub has_cargo_toml: bool,
    pub has_cargo_lock: bool,
}

impl AppLayout {
    /// Inspect `build_dir`
    pub fn detect(build_dir: &Path) -> SupplyResult<Self> {
        Ok(Self {
            has_cargo_toml: file_exists(&build_dir.join("Cargo.toml"))?,
            has_cargo_lock: file_exists(&build_dir.join("Cargo.lock"))?,
        })
    }
}

fn file_exists(path: &Path) -> SupplyResult<bool> {
    path.try_exists().map_err(|e| SupplyError::FileReadError {
        path: path.to_path_buf(),
        error: format!("unable to determine if file exists: {}", e),
    })
}

/// A rustup toolchain name such as `stable` or `nightly-2018-08-18`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain(String);

impl Toolchain {
    /// Validate a toolchain name read from `path`
    pub fn new(value: &str, path: &Path) -> SupplyResult<Self> {
        if !is_toolchain_name(value) {
            return Err(SupplyError::InvalidToolchain {
                path: path.to_path_buf(),
                value: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_toolchain_name(value: &str) -> bool {
    Regex::new(TOOLCHAIN_PATTERN)
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

#[derive(Debug, Deserialize)]
struct ToolchainFile {
    toolchain: ToolchainSection,
}

#[derive(Debug, Deserialize)]
struct ToolchainSection {
    #[serde(default)]
    channel: Option<String>,
}

/// Find the toolchain the app pins, if any
///
/// `rust-toolchain` wins over `rust-toolchain.toml`. An empty file, or a
/// TOML file without a `channel`, pins nothing.
pub fn detect_toolchain(build_dir: &Path) -> SupplyResult<Option<Toolchain>> {
    for name in [TOOLCHAIN_FILE, TOOLCHAIN_TOML_FILE] {
        let path = build_dir.join(name);
        if file_exists(&path)? {
            return read_toolchain_file(&path);
        }
    }

    Ok(None)
}

fn read_toolchain_file(path: &Path) -> SupplyResult<Option<Toolchain>> {
    let content = std::fs::read_to_string(path).map_err(|e| SupplyError::FileReadError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    let channel = if content.contains("[toolchain]") {
        let file: ToolchainFile = toml::from_str(&content)?;
        file.toolchain.channel.unwrap_or_default()
    } else {
        content
    };

    let channel = channel.trim();
    if channel.is_empty() {
        return Ok(None);
    }

    Toolchain::new(channel, path).map(Some)
}

/// Arguments appended to the rustup installer command line
pub fn install_suffix(toolchain: Option<&Toolchain>) -> String {
    match toolchain {
        Some(toolchain) => format!(" --default-toolchain {}", toolchain),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toolchain_file_sets_suffix() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TOOLCHAIN_FILE), "nightly-2018-08-18\n").unwrap();

        let toolchain = detect_toolchain(dir.path()).unwrap();

        assert_eq!(
            install_suffix(toolchain.as_ref()),
            " --default-toolchain nightly-2018-08-18"
        );
    }

    #[test]
    fn test_no_toolchain_file_is_empty_suffix() {
        let dir = TempDir::new().unwrap();

        let toolchain = detect_toolchain(dir.path()).unwrap();

        assert_eq!(toolchain, None);
        assert_eq!(install_suffix(toolchain.as_ref()), "");
    }

    #[test]
    fn test_toml_toolchain_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(TOOLCHAIN_TOML_FILE),
            "[toolchain]\nchannel = \"1.75.0\"\ncomponents = [\"clippy\"]\n",
        )
        .unwrap();

        let toolchain = detect_toolchain(dir.path()).unwrap().unwrap();

        assert_eq!(toolchain.as_str(), "1.75.0");
    }

    #[test]
    fn test_legacy_file_takes_precedence() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TOOLCHAIN_FILE), "beta").unwrap();
        std::fs::write(
            dir.path().join(TOOLCHAIN_TOML_FILE),
            "[toolchain]\nchannel = \"stable\"\n",
        )
        .unwrap();

        let toolchain = detect_toolchain(dir.path()).unwrap().unwrap();

        assert_eq!(toolchain.as_str(), "beta");
    }

    #[test]
    fn test_blank_toolchain_file_pins_nothing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TOOLCHAIN_FILE), "  \n").unwrap();

        assert_eq!(detect_toolchain(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_toolchain_with_spaces_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TOOLCHAIN_FILE), "stable --no-modify-path").unwrap();

        let result = detect_toolchain(dir.path());

        assert!(matches!(result, Err(SupplyError::InvalidToolchain { .. })));
    }

    #[test]
    fn test_app_layout() {
        let dir = TempDir::new().unwrap();
        assert_eq!(AppLayout::detect(dir.path()).unwrap(), AppLayout::default());

        std::fs::write(dir.path().join("Cargo.toml"), "[package]").unwrap();
        let layout = AppLayout::detect(dir.path()).unwrap();

        assert!(layout.has_cargo_toml);
        assert!(!layout.has_cargo_lock);
    }
}
