// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Staging context
//!
//! The directories a supply buildpack is handed by the platform
//! (`supply BUILD_DIR CACHE_DIR DEPS_DIR DEPS_IDX`) and the files it
//! leaves behind in its own dependency directory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::{SupplyError, SupplyResult};

/// Contents of `<dep_dir>/config.yml`, read by later buildpacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepConfig {
    /// Buildpack name
    pub name: String,

    /// Free-form values for downstream buildpacks
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// Trait for staging contexts
pub trait Stager: Send + Sync {
    /// Application directory being staged
    fn build_dir(&self) -> &Path;

    /// Directory persisted between stagings
    fn cache_dir(&self) -> &Path;

    /// Root of all buildpacks' dependency directories
    fn deps_dir(&self) -> &Path;

    /// This buildpack's index within `deps_dir`
    fn deps_idx(&self) -> &str;

    /// This buildpack's own dependency directory
    fn dep_dir(&self) -> PathBuf {
        self.deps_dir().join(self.deps_idx())
    }

    /// Write a script that is sourced when the app starts
    fn write_profile_d(&self, name: &str, contents: &str) -> SupplyResult<PathBuf> {
        let dir = self.dep_dir().join("profile.d");
        write_file(&dir, &dir.join(name), contents)
    }

    /// Write `config.yml` into the dependency directory
    fn write_config_yml(&self, config: &DepConfig) -> SupplyResult<PathBuf> {
        let dir = self.dep_dir();
        let yaml = serde_yaml::to_string(config)?;
        write_file(&dir, &dir.join("config.yml"), &yaml)
    }
}

fn write_file(dir: &Path, path: &Path, contents: &str) -> SupplyResult<PathBuf> {
    std::fs::create_dir_all(dir)
        .and_then(|_| std::fs::write(path, contents))
        .map_err(|e| SupplyError::FileWriteError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

    Ok(path.to_path_buf())
}

/// Staging context backed by directories on disk
#[derive(Debug, Clone)]
pub struct DirectoryStager {
    build_dir: PathBuf,
    cache_dir: PathBuf,
    deps_dir: PathBuf,
    deps_idx: String,
}

impl DirectoryStager {
    /// Create a stager, creating this buildpack's dependency directory
    pub fn new(
        build_dir: PathBuf,
        cache_dir: PathBuf,
        deps_dir: PathBuf,
        deps_idx: impl Into<String>,
    ) -> SupplyResult<Self> {
        if !build_dir.is_dir() {
            return Err(SupplyError::BuildDirNotFound { path: build_dir });
        }

        let stager = Self {
            build_dir,
            cache_dir,
            deps_dir,
            deps_idx: deps_idx.into(),
        };

        let dep_dir = stager.dep_dir();
        std::fs::create_dir_all(&dep_dir).map_err(|e| SupplyError::FileWriteError {
            path: dep_dir.clone(),
            error: e.to_string(),
        })?;

        Ok(stager)
    }
}

impl Stager for DirectoryStager {
    fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn deps_dir(&self) -> &Path {
        &self.deps_dir
    }

    fn deps_idx(&self) -> &str {
        &self.deps_idx
    }
}
