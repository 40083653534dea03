// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! rust-buildpack - Rust supply buildpack
//!
//! Install a Rust toolchain and compile the app being staged.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_buildpack::cli::{Cli, Commands};
use rust_buildpack::utils::log;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "rust_buildpack=debug"
    } else {
        "rust_buildpack=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    log::configure_colors();

    // Dispatch to command handlers
    match cli.command {
        Commands::Detect { build_dir } => {
            rust_buildpack::cli::detect::run(build_dir, cli.verbose).await
        }
        Commands::Supply {
            build_dir,
            cache_dir,
            deps_dir,
            deps_idx,
            rustup_url,
        } => {
            rust_buildpack::cli::supply::run(
                build_dir,
                cache_dir,
                deps_dir,
                deps_idx,
                rustup_url,
                cli.verbose,
            )
            .await
        }
    }
}
