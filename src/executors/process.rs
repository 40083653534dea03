// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Single process execution
//!
//! Runs one command with its output and error streams forwarded to
//! caller-owned sinks as the bytes are produced.

use std::io::{self, Write};
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;

use super::CommandSpec;
use crate::errors::{SupplyError, SupplyResult};

const CHUNK_SIZE: usize = 8 * 1024;

/// Run `command` in `working_dir` and wait for it to finish
///
/// Returns `ProcessStart` if it cannot be launched and `ProcessExit` if it
/// exits non-zero. Output written before a failing exit stays in the sinks.
pub async fn execute_command<O, E>(
    working_dir: &Path,
    out: &mut O,
    err: &mut E,
    command: &CommandSpec,
) -> SupplyResult<()>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    command.validate()?;

    let mut cmd = command.to_command(working_dir);
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let child = cmd
        .spawn()
        .map_err(|e| SupplyError::process_start(command.program(), &e))?;

    let status = wait_forwarding(child, out, err).await?;
    check_status(command, status)
}

/// Wait for `child` while copying its piped stdout/stderr into the sinks
///
/// Waiting and both copies run concurrently, so a process that fills one
/// pipe while we read the other cannot stall. A failed sink write drops
/// that reader; the process then sees a broken pipe and is still awaited.
pub(crate) async fn wait_forwarding<O, E>(
    mut child: Child,
    out: &mut O,
    err: &mut E,
) -> SupplyResult<ExitStatus>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (status, out_result, err_result) =
        tokio::join!(child.wait(), forward(stdout, out), forward(stderr, err));

    let status = status?;
    if !status.success() {
        // The exit status is the more useful error.
        return Ok(status);
    }

    out_result?;
    err_result?;
    Ok(status)
}

/// Map a termination status onto the error taxonomy
pub(crate) fn check_status(command: &CommandSpec, status: ExitStatus) -> SupplyResult<()> {
    if status.success() {
        Ok(())
    } else {
        Err(SupplyError::ProcessExit {
            program: command.program().to_string(),
            status,
        })
    }
}

/// Copy a stream into a sink chunk by chunk until end of data
async fn forward<R, W>(reader: Option<R>, sink: &mut W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: Write + ?Sized,
{
    let Some(mut reader) = reader else {
        return Ok(());
    };

    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return sink.flush();
        }
        sink.write_all(&buf[..n])?;
    }
}
