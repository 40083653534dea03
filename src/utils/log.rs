// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Buildpack step output
//!
//! Staging logs are read in the platform's output, so lines follow the
//! usual buildpack shape: `-----> Step` headers and indented detail.

use colored::Colorize;

const INDENT: &str = "       ";

/// Check if colors should be disabled
pub fn should_use_colors() -> bool {
    // Respect NO_COLOR environment variable
    std::env::var_os("NO_COLOR").is_none()
}

/// Apply [`should_use_colors`] to all later output
pub fn configure_colors() {
    if !should_use_colors() {
        colored::control::set_override(false);
    }
}

/// Format a step header
pub fn step_line(msg: &str) -> String {
    format!("{} {}", "----->".bold(), msg.bold())
}

/// Format an indented detail line
pub fn info_line(msg: &str) -> String {
    format!("{}{}", INDENT, msg)
}

/// Format a warning line
pub fn warning_line(msg: &str) -> String {
    format!("{}{} {}", INDENT, "**WARNING**".yellow().bold(), msg)
}

/// Format an error line
pub fn error_line(msg: &str) -> String {
    format!("{}{} {}", INDENT, "**ERROR**".red().bold(), msg)
}

/// Print a step header
pub fn begin_step(msg: &str) {
    println!("{}", step_line(msg));
}

/// Print a detail line
pub fn info(msg: &str) {
    println!("{}", info_line(msg));
}

/// Print a warning
pub fn warning(msg: &str) {
    println!("{}", warning_line(msg));
}

/// Print an error
pub fn error(msg: &str) {
    eprintln!("{}", error_line(msg));
}
