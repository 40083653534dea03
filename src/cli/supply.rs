// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Supply command - install the toolchain and build the app

use miette::Result;
use std::path::PathBuf;

use crate::errors::SupplyError;
use crate::executors::{PipeOptions, ProcessRunner};
use crate::stager::{DirectoryStager, Stager};
use crate::supply::{BuildpackConfig, Supplier};
use crate::utils::log;

/// Tools the installer pipe needs on the stack
const REQUIRED_TOOLS: [&str; 2] = ["curl", "sh"];

/// Run the supply command
pub async fn run(
    build_dir: PathBuf,
    cache_dir: PathBuf,
    deps_dir: PathBuf,
    deps_idx: String,
    rustup_url: Option<String>,
    verbose: bool,
) -> Result<()> {
    let stager = DirectoryStager::new(build_dir, cache_dir, deps_dir, deps_idx)?;

    let mut config = BuildpackConfig::load(stager.build_dir())?;
    if let Some(url) = rustup_url {
        config.rustup_url = url;
    }
    if verbose {
        tracing::info!(?config, dep_dir = %stager.dep_dir().display(), "staging");
    }

    check_tools()?;

    // A failed download must not be masked by `sh` happily running an
    // empty script.
    let runner = ProcessRunner::with_pipe_options(PipeOptions {
        check_upstream: true,
    });
    let supplier = Supplier::new(&stager, &runner, config);

    // Tool output goes to our stdout on both streams, as staging logs are
    // collected from there.
    let mut out = std::io::stdout();
    let mut err = std::io::stdout();

    supplier.run(&mut out, &mut err).await.map_err(|e| {
        log::error(&e.to_string());
        e.into()
    })
}

/// Check that every required tool is on PATH
fn check_tools() -> Result<(), SupplyError> {
    for tool in REQUIRED_TOOLS {
        let path = which::which(tool).map_err(|_| SupplyError::tool_not_found(tool))?;
        tracing::debug!(tool, path = %path.display(), "found tool");
    }
    Ok(())
}
