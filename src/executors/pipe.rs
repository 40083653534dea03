// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Two-process pipe executor
//!
//! Runs `upstream | downstream` without a shell: the upstream process's
//! stdout becomes the downstream process's stdin, and the downstream
//! process's stdout/stderr are forwarded to caller-owned sinks. Only the
//! downstream result is reported unless [`PipeOptions::check_upstream`]
//! is set.

use std::io::Write;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Child;

use super::process::{check_status, wait_forwarding};
use super::CommandSpec;
use crate::errors::{SupplyError, SupplyResult};

const SIGPIPE: i32 = 13;

/// Pipe execution options
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeOptions {
    /// Also fail when the upstream process fails to start or exits
    /// non-zero. Checked only after the downstream process succeeded;
    /// a producer stopped by a broken pipe still counts as success.
    pub check_upstream: bool,
}

/// Executes two commands connected by a pipe
#[derive(Debug, Clone, Default)]
pub struct PipeExecutor {
    options: PipeOptions,
}

impl PipeExecutor {
    /// Create an executor that reports only the downstream result
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor with explicit options
    pub fn with_options(options: PipeOptions) -> Self {
        Self { options }
    }

    /// Run `upstream | downstream` in `working_dir`
    ///
    /// # Arguments
    /// * `working_dir` - Directory both processes run in; empty means the current directory
    /// * `out` - Receives the downstream process's stdout
    /// * `err` - Receives the downstream process's stderr
    /// * `upstream` - Producer; its stdout feeds the downstream process
    /// * `downstream` - Consumer; its exit status is the result
    pub async fn run<O, E>(
        &self,
        working_dir: &Path,
        out: &mut O,
        err: &mut E,
        upstream: &CommandSpec,
        downstream: &CommandSpec,
    ) -> SupplyResult<()>
    where
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        upstream.validate()?;
        downstream.validate()?;

        let mut producer = upstream.to_command(working_dir);
        producer.stdout(Stdio::piped());

        // Upstream start failures are not reported here; the consumer just
        // sees an empty stdin.
        let mut upstream_child = producer.spawn();
        let pipe = match upstream_child.as_mut() {
            Ok(child) => child
                .stdout
                .take()
                .and_then(|stdout| TryInto::<Stdio>::try_into(stdout).ok()),
            Err(_) => None,
        };

        let mut consumer = downstream.to_command(working_dir);
        consumer
            .stdin(pipe.unwrap_or_else(Stdio::null))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let spawned = consumer.spawn();
        // Release our handle on the pipe's read end now, on both paths, so
        // the producer gets EPIPE as soon as the consumer goes away.
        drop(consumer);

        let downstream_child =
            spawned.map_err(|e| SupplyError::process_start(downstream.program(), &e))?;

        let status = wait_forwarding(downstream_child, out, err).await?;
        check_status(downstream, status)?;

        if self.options.check_upstream {
            check_upstream(upstream, upstream_child).await?;
        }

        Ok(())
    }
}

/// Wait for the producer and report its failure, if any
async fn check_upstream(
    upstream: &CommandSpec,
    child: std::io::Result<Child>,
) -> SupplyResult<()> {
    let failed = |reason: String| SupplyError::UpstreamFailed {
        program: upstream.program().to_string(),
        reason,
    };

    let status = child
        .map_err(|e| failed(format!("could not start: {}", e)))?
        .wait()
        .await
        .map_err(|e| failed(e.to_string()))?;

    if status.success() || is_broken_pipe(status) {
        Ok(())
    } else {
        Err(failed(status.to_string()))
    }
}

/// Whether the producer ended because its reader went away
///
/// Either killed by SIGPIPE directly, or a shell reporting a child that
/// was (`128 + SIGPIPE`).
fn is_broken_pipe(status: ExitStatus) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if status.signal() == Some(SIGPIPE) {
            return true;
        }
    }

    status.code() == Some(128 + SIGPIPE)
}

/// Run two whitespace-delimited command lines as `command1 | command2`
///
/// Convenience adapter over [`PipeExecutor::run`]: both lines are split on
/// whitespace before anything starts, and a line with no tokens fails
/// with `InvalidCommand`.
pub async fn execute_with_pipe<O, E>(
    working_dir: &Path,
    out: &mut O,
    err: &mut E,
    command1: &str,
    command2: &str,
) -> SupplyResult<()>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let upstream = CommandSpec::parse(command1)?;
    let downstream = CommandSpec::parse(command2)?;

    PipeExecutor::new()
        .run(working_dir, out, err, &upstream, &downstream)
        .await
}
