// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Error types
//!
//! Every failure the buildpack can report, with a diagnostic code and,
//! where there is something the user can do about it, a help message.

use miette::Diagnostic;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type for buildpack operations
pub type SupplyResult<T> = Result<T, SupplyError>;

/// Main error type for rust-buildpack
#[derive(Error, Debug, Diagnostic)]
pub enum SupplyError {
    // ─────────────────────────────────────────────────────────────────────────
    // Process Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Invalid command: '{command}' contains no program to run")]
    #[diagnostic(
        code(rust_buildpack::invalid_command),
        help("A command line needs at least one whitespace-separated token")
    )]
    InvalidCommand { command: String },

    #[error("Failed to start '{program}': {error}")]
    #[diagnostic(code(rust_buildpack::process_start))]
    ProcessStart {
        program: String,
        error: String,
        #[help]
        help: Option<String>,
    },

    #[error("Command '{program}' failed with {status}")]
    #[diagnostic(code(rust_buildpack::process_exit))]
    ProcessExit { program: String, status: ExitStatus },

    #[error("Upstream command '{program}' failed: {reason}")]
    #[diagnostic(
        code(rust_buildpack::upstream_failed),
        help("The producing side of the pipe failed, so its output cannot be trusted")
    )]
    UpstreamFailed { program: String, reason: String },

    #[error("Tool '{tool}' not found")]
    #[diagnostic(code(rust_buildpack::tool_not_found), help("{suggestion}"))]
    ToolNotFound { tool: String, suggestion: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Staging Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Build directory not found: {path}")]
    #[diagnostic(code(rust_buildpack::build_dir_not_found))]
    BuildDirNotFound { path: PathBuf },

    #[error("Invalid toolchain '{value}' in {path}")]
    #[diagnostic(
        code(rust_buildpack::invalid_toolchain),
        help("The toolchain file must name a single rustup toolchain, e.g. 'stable' or 'nightly-2018-08-18'")
    )]
    InvalidToolchain { path: PathBuf, value: String },

    #[error("error during {step}: {source}")]
    #[diagnostic(code(rust_buildpack::step_failed))]
    StepFailed {
        step: String,
        source: Box<SupplyError>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(rust_buildpack::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(rust_buildpack::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/Parse Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(rust_buildpack::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(rust_buildpack::yaml_error))]
    Yaml { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(rust_buildpack::toml_error))]
    Toml { message: String },
}

impl From<std::io::Error> for SupplyError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for SupplyError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<toml::de::Error> for SupplyError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl SupplyError {
    /// Create a tool not found error with installation suggestion
    pub fn tool_not_found(tool: &str) -> Self {
        let suggestion = match tool {
            "curl" => "Use a stack that ships curl (e.g. cflinuxfs3/cflinuxfs4)".to_string(),
            _ => format!("Install {} and ensure it's in your PATH", tool),
        };

        Self::ToolNotFound {
            tool: tool.to_string(),
            suggestion,
        }
    }

    /// Create a process start error, with a hint for the common causes
    pub fn process_start(program: &str, error: &std::io::Error) -> Self {
        let help = match error.kind() {
            std::io::ErrorKind::NotFound => Some(format!(
                "'{}' or the working directory does not exist",
                program
            )),
            std::io::ErrorKind::PermissionDenied => {
                Some(format!("'{}' is not executable", program))
            }
            _ => None,
        };

        Self::ProcessStart {
            program: program.to_string(),
            error: error.to_string(),
            help,
        }
    }

    /// Wrap an error with the name of the staging phase it came from
    pub fn in_step(step: &str) -> impl FnOnce(SupplyError) -> SupplyError + '_ {
        move |source| Self::StepFailed {
            step: step.to_string(),
            source: Box::new(source),
        }
    }

    /// Exit code of a failed process, if it exited normally
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ProcessExit { status, .. } => status.code(),
            Self::StepFailed { source, .. } => source.exit_code(),
            _ => None,
        }
    }
}
