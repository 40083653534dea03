// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Supply step orchestration
//!
//! Runs the staging phases in order. Each phase hands its result to the
//! next as a value; a failing phase aborts the run with its name attached.

use std::collections::BTreeMap;
use std::io::Write;

use crate::errors::{SupplyError, SupplyResult};
use crate::executors::{CommandRunner, CommandSpec};
use crate::stager::{DepConfig, Stager};
use crate::supply::detect::{detect_toolchain, install_suffix, AppLayout, Toolchain};
use crate::supply::profile::{cargo_home, profile_script, rustup_home, PROFILE_SCRIPT};
use crate::supply::BuildpackConfig;
use crate::utils::log;

/// Name recorded in the dependency directory's config.yml
pub const BUILDPACK_NAME: &str = "rust";

/// Supplies a Rust toolchain to an app being staged
pub struct Supplier<'a> {
    stager: &'a dyn Stager,
    runner: &'a dyn CommandRunner,
    config: BuildpackConfig,
}

impl<'a> Supplier<'a> {
    /// Create a new supplier
    pub fn new(
        stager: &'a dyn Stager,
        runner: &'a dyn CommandRunner,
        config: BuildpackConfig,
    ) -> Self {
        Self {
            stager,
            runner,
            config,
        }
    }

    /// Run every phase, sending tool output to `out` and `err`
    pub async fn run(
        &self,
        out: &mut (dyn Write + Send),
        err: &mut (dyn Write + Send),
    ) -> SupplyResult<()> {
        log::begin_step("Supplying Rust");

        let layout = self.setup().map_err(SupplyError::in_step("setup"))?;

        let toolchain = self
            .detect_compiler_version()
            .map_err(SupplyError::in_step("detecting compiler version"))?;

        self.install_compiler(toolchain.as_ref(), out, err)
            .await
            .map_err(SupplyError::in_step("compiler installation"))?;

        self.compile_app(&layout, out, err)
            .await
            .map_err(SupplyError::in_step("compilation"))?;

        self.write_profile_d(toolchain.as_ref())
            .map_err(SupplyError::in_step("writing .profile.d"))?;

        Ok(())
    }

    /// Detect which Cargo files the app ships
    pub fn setup(&self) -> SupplyResult<AppLayout> {
        let layout = AppLayout::detect(self.stager.build_dir())?;
        tracing::debug!(
            cargo_toml = layout.has_cargo_toml,
            cargo_lock = layout.has_cargo_lock,
            "detected app layout"
        );
        Ok(layout)
    }

    /// Find the toolchain pinned by the app
    pub fn detect_compiler_version(&self) -> SupplyResult<Option<Toolchain>> {
        let toolchain = detect_toolchain(self.stager.build_dir())?;
        match &toolchain {
            Some(toolchain) => log::info(&format!("Using toolchain {}", toolchain)),
            None => log::info("No toolchain file found, using rustup's default"),
        }
        Ok(toolchain)
    }

    /// The `curl ... | sh ...` pair that runs the rustup installer
    pub fn install_commands(
        &self,
        toolchain: Option<&Toolchain>,
    ) -> SupplyResult<(CommandSpec, CommandSpec)> {
        let dep_dir = self.stager.dep_dir();

        let download = CommandSpec::new("curl")
            .arg(self.config.rustup_url.as_str())
            .arg("-sSf");
        let install = CommandSpec::parse(&format!("sh -s -- -y{}", install_suffix(toolchain)))?
            .env("CARGO_HOME", cargo_home(&dep_dir).to_string_lossy())
            .env("RUSTUP_HOME", rustup_home(&dep_dir).to_string_lossy());

        Ok((download, install))
    }

    /// Download and run the rustup installer
    pub async fn install_compiler(
        &self,
        toolchain: Option<&Toolchain>,
        out: &mut (dyn Write + Send),
        err: &mut (dyn Write + Send),
    ) -> SupplyResult<()> {
        let (download, install) = self.install_commands(toolchain)?;
        log::begin_step("Installing rustup");
        tracing::debug!(upstream = %download, downstream = %install, "running installer pipe");

        self.runner
            .execute_with_pipe(self.stager.build_dir(), out, err, &download, &install)
            .await
    }

    /// The cargo invocation for the app, or `None` when nothing is built
    pub fn compile_command(&self, layout: &AppLayout) -> Option<CommandSpec> {
        if self.config.skip_compile || !layout.has_cargo_toml {
            return None;
        }

        let dep_dir = self.stager.dep_dir();
        let cargo = cargo_home(&dep_dir).join("bin").join("cargo");

        let mut command = CommandSpec::new(cargo.to_string_lossy()).arg("build");
        if self.config.release {
            command = command.arg("--release");
        }
        if layout.has_cargo_lock {
            command = command.arg("--locked");
        }

        Some(
            command
                .args(self.config.cargo_args.iter().cloned())
                .env("CARGO_HOME", cargo_home(&dep_dir).to_string_lossy())
                .env("RUSTUP_HOME", rustup_home(&dep_dir).to_string_lossy()),
        )
    }

    /// Build the app with the installed toolchain
    pub async fn compile_app(
        &self,
        layout: &AppLayout,
        out: &mut (dyn Write + Send),
        err: &mut (dyn Write + Send),
    ) -> SupplyResult<()> {
        let Some(command) = self.compile_command(layout) else {
            if !layout.has_cargo_toml {
                log::warning("No Cargo.toml found, skipping compilation");
            } else {
                log::info("Compilation disabled by configuration");
            }
            return Ok(());
        };

        log::begin_step("Compiling app");
        tracing::debug!(command = %command, "running cargo");

        self.runner
            .execute(self.stager.build_dir(), out, err, &command)
            .await
    }

    /// Write the runtime profile script and config.yml
    pub fn write_profile_d(&self, toolchain: Option<&Toolchain>) -> SupplyResult<()> {
        let script = self
            .stager
            .write_profile_d(PROFILE_SCRIPT, &profile_script(self.stager.deps_idx()))?;
        tracing::debug!(path = %script.display(), "wrote profile script");

        let channel = toolchain.map_or("stable", Toolchain::as_str);
        self.stager.write_config_yml(&DepConfig {
            name: BUILDPACK_NAME.to_string(),
            config: BTreeMap::from([("toolchain".to_string(), channel.to_string())]),
        })?;

        Ok(())
    }
}
