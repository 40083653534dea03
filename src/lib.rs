// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! # rust-buildpack - Rust supply buildpack
//!
//! `rust-buildpack` stages Rust apps: it installs a toolchain with rustup,
//! compiles the app with cargo, and leaves a `.profile.d` script that puts
//! the toolchain on `PATH` at runtime.
//!
//! ## Features
//!
//! - **Shell-free pipes** - `curl ... | sh ...` run as two processes joined by an OS pipe
//! - **Toolchain pinning** - Honours `rust-toolchain` and `rust-toolchain.toml`
//! - **Configurable builds** - Optional `rust-buildpack.yml` in the app root
//!
//! ## Quick Start
//!
//! ```bash
//! # Is this a Cargo project?
//! rust-buildpack detect /tmp/app
//!
//! # Install the toolchain and build
//! rust-buildpack supply /tmp/app /tmp/cache /tmp/deps 0
//! ```

pub mod cli;
pub mod errors;
pub mod executors;
pub mod stager;
pub mod supply;
pub mod utils;

// Re-export commonly used types
pub use errors::{SupplyError, SupplyResult};
pub use executors::{
    execute_with_pipe, CommandRunner, CommandSpec, PipeExecutor, PipeOptions, ProcessRunner,
    SharedSink,
};
pub use stager::{DirectoryStager, Stager};
pub use supply::{BuildpackConfig, Supplier};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
