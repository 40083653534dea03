// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn buildpack() -> Command {
    Command::cargo_bin("rust-buildpack").unwrap()
}

#[test]
fn test_detect_cargo_project() {
    let app = TempDir::new().unwrap();
    std::fs::write(app.path().join("Cargo.toml"), "[package]\nname = \"app\"\n").unwrap();

    buildpack()
        .arg("detect")
        .arg(app.path())
        .assert()
        .success()
        .stdout("rust\n");
}

#[test]
fn test_detect_rejects_non_cargo_app() {
    let app = TempDir::new().unwrap();

    buildpack()
        .arg("detect")
        .arg(app.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Cargo.toml found"));
}

#[test]
fn test_supply_missing_build_dir() {
    let root = TempDir::new().unwrap();

    buildpack()
        .env("NO_COLOR", "1")
        .arg("supply")
        .arg(root.path().join("missing"))
        .arg(root.path().join("cache"))
        .arg(root.path().join("deps"))
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Build directory not found"));
}

#[test]
fn test_supply_reports_missing_tools() {
    let root = TempDir::new().unwrap();
    let app = root.path().join("app");
    let empty_path = root.path().join("bin");
    std::fs::create_dir_all(&app).unwrap();
    std::fs::create_dir_all(&empty_path).unwrap();

    buildpack()
        .env("NO_COLOR", "1")
        .env("PATH", &empty_path)
        .arg("supply")
        .arg(&app)
        .arg(root.path().join("cache"))
        .arg(root.path().join("deps"))
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tool 'curl' not found"));
}

#[test]
fn test_help_lists_commands() {
    buildpack()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("supply").and(predicate::str::contains("detect")));
}
