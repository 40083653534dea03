// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Command specifications
//!
//! A [`CommandSpec`] is an explicit program + argument list. Building one
//! with [`CommandSpec::new`] is the primary interface; [`CommandSpec::parse`]
//! splits a free-text line on whitespace and exists for callers that already
//! hold a command line as a string.

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::str::FromStr;

use tokio::process::Command;

use crate::errors::{SupplyError, SupplyResult};

/// A program to run with its arguments and extra environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Parse a whitespace-delimited command line
    ///
    /// No quoting or escaping is understood: `echo "a b"` yields the
    /// arguments `"a` and `b"`.
    pub fn parse(line: &str) -> SupplyResult<Self> {
        let mut tokens = line.split_whitespace().map(str::to_string);

        let program = tokens.next().ok_or_else(|| SupplyError::InvalidCommand {
            command: line.to_string(),
        })?;

        Ok(Self {
            program,
            args: tokens.collect(),
            envs: Vec::new(),
        })
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the spawned process
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn envs(&self) -> &[(String, String)] {
        &self.envs
    }

    /// Reject specs that have nothing to execute
    pub(crate) fn validate(&self) -> SupplyResult<()> {
        if self.program.trim().is_empty() {
            return Err(SupplyError::InvalidCommand {
                command: self.to_string(),
            });
        }
        Ok(())
    }

    /// Build the process command, rooted at `working_dir`
    ///
    /// An empty `working_dir` keeps the caller's current directory.
    /// Standard streams default to the null device; callers override
    /// the ones they connect.
    pub(crate) fn to_command(&self, working_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.envs(self.envs.iter().map(|(k, v)| (k, v)));

        if !working_dir.as_os_str().is_empty() {
            cmd.current_dir(working_dir);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        cmd
    }
}

impl FromStr for CommandSpec {
    type Err = SupplyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_whitespace() {
        let spec = CommandSpec::parse("curl https://sh.rustup.rs  -sSf").unwrap();
        assert_eq!(spec.program(), "curl");
        assert_eq!(spec.arguments(), ["https://sh.rustup.rs", "-sSf"]);
    }

    #[test]
    fn test_parse_empty_fails() {
        for line in ["", "   ", "\t\n"] {
            let err = CommandSpec::parse(line).unwrap_err();
            assert!(matches!(err, SupplyError::InvalidCommand { .. }), "{line:?}");
        }
    }

    #[test]
    fn test_parse_keeps_quotes_verbatim() {
        let spec: CommandSpec = r#"echo "test""#.parse().unwrap();
        assert_eq!(spec.arguments(), [r#""test""#]);
    }

    #[test]
    fn test_display_renders_command_line() {
        let spec = CommandSpec::new("sh")
            .args(["-s", "--", "-y"])
            .env("CARGO_HOME", "/deps/0/cargo");
        assert_eq!(spec.to_string(), "sh -s -- -y");
    }

    #[test]
    fn test_validate_rejects_blank_program() {
        assert!(CommandSpec::new(" ").arg("x").validate().is_err());
        assert!(CommandSpec::new("true").validate().is_ok());
    }
}
