// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Process executors
//!
//! This module provides the command specification type, the two-process
//! pipe executor, single-command execution, and the [`CommandRunner`]
//! trait the staging steps are written against.

mod command;
mod pipe;
mod process;
mod sink;

pub use command::CommandSpec;
pub use pipe::{execute_with_pipe, PipeExecutor, PipeOptions};
pub use process::execute_command;
pub use sink::SharedSink;

use async_trait::async_trait;
use std::io::Write;
use std::path::Path;

use crate::errors::SupplyResult;

/// Trait for running external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `upstream | downstream`
    ///
    /// # Arguments
    /// * `working_dir` - Directory both processes run in
    /// * `out` - Sink for the downstream process's stdout
    /// * `err` - Sink for the downstream process's stderr
    /// * `upstream` - Producer command
    /// * `downstream` - Consumer command; its exit status is the result
    async fn execute_with_pipe(
        &self,
        working_dir: &Path,
        out: &mut (dyn Write + Send),
        err: &mut (dyn Write + Send),
        upstream: &CommandSpec,
        downstream: &CommandSpec,
    ) -> SupplyResult<()>;

    /// Run a single command
    async fn execute(
        &self,
        working_dir: &Path,
        out: &mut (dyn Write + Send),
        err: &mut (dyn Write + Send),
        command: &CommandSpec,
    ) -> SupplyResult<()>;
}

/// Runs commands as real OS processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    pipe: PipeExecutor,
}

impl ProcessRunner {
    /// Create a runner that reports only the downstream result of a pipe
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner whose pipes use the given options
    pub fn with_pipe_options(options: PipeOptions) -> Self {
        Self {
            pipe: PipeExecutor::with_options(options),
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn execute_with_pipe(
        &self,
        working_dir: &Path,
        out: &mut (dyn Write + Send),
        err: &mut (dyn Write + Send),
        upstream: &CommandSpec,
        downstream: &CommandSpec,
    ) -> SupplyResult<()> {
        self.pipe
            .run(working_dir, out, err, upstream, downstream)
            .await
    }

    async fn execute(
        &self,
        working_dir: &Path,
        out: &mut (dyn Write + Send),
        err: &mut (dyn Write + Send),
        command: &CommandSpec,
    ) -> SupplyResult<()> {
        execute_command(working_dir, out, err, command).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_runner_through_trait_object() {
        let runner: Box<dyn CommandRunner> = Box::new(ProcessRunner::new());
        let mut out = Vec::new();
        let mut err = Vec::new();

        runner
            .execute_with_pipe(
                Path::new(""),
                &mut out,
                &mut err,
                &CommandSpec::new("echo").arg("rustup"),
                &CommandSpec::new("grep").arg("rust"),
            )
            .await
            .unwrap();
        runner
            .execute(Path::new(""), &mut out, &mut err, &CommandSpec::new("true"))
            .await
            .unwrap();

        assert_eq!(String::from_utf8_lossy(&out), "rustup\n");
    }
}
