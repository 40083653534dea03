// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for rust-buildpack.

pub mod detect;
pub mod supply;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rust supply buildpack
///
/// Installs a Rust toolchain with rustup and compiles the app being staged.
#[derive(Parser, Debug)]
#[clap(
    name = "rust-buildpack",
    version,
    about = "Supply buildpack that installs a Rust toolchain and builds the app",
    long_about = None,
    after_help = "Examples:\n\
        rust-buildpack detect /tmp/app                        Check for a Cargo project\n\
        rust-buildpack supply /tmp/app /tmp/cache /tmp/deps 0 Install rustup and build\n\n\
        See 'rust-buildpack <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Exit successfully if the app is a Cargo project
    Detect {
        /// Application directory
        build_dir: PathBuf,
    },

    /// Install the toolchain and compile the app
    Supply {
        /// Application directory
        build_dir: PathBuf,

        /// Directory persisted between stagings
        cache_dir: PathBuf,

        /// Root of the buildpacks' dependency directories
        deps_dir: PathBuf,

        /// This buildpack's index within DEPS_DIR
        deps_idx: String,

        /// Override the rustup installer URL from rust-buildpack.yml
        #[clap(long, env = "RUST_BUILDPACK_RUSTUP_URL", value_name = "URL")]
        rustup_url: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_supply_args() {
        let cli = Cli::parse_from(["rust-buildpack", "supply", "/app", "/cache", "/deps", "1"]);

        let Commands::Supply {
            build_dir,
            deps_idx,
            ..
        } = cli.command
        else {
            panic!("expected supply");
        };
        assert_eq!(build_dir, PathBuf::from("/app"));
        assert_eq!(deps_idx, "1");
    }
}
