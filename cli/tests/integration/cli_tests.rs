//! Integration tests for the CLI skeleton: help, version, global flags.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn kitchen_solo() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kitchen-solo"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("KITCHEN_SOLO_CONFIG");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    kitchen_solo().assert().code(2).stderr(predicate::str::contains(
        "Chef Solo provisioner for test targets",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    kitchen_solo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("command"))
        .stdout(predicate::str::contains("sandbox"))
        .stdout(predicate::str::contains("converge"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    kitchen_solo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kitchen-solo"));
}

#[test]
fn test_version_command_shows_api_version() {
    kitchen_solo()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "kitchen-solo ",
            env!("CARGO_PKG_VERSION")
        )))
        .stdout(predicate::str::contains("provisioner API v2"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = kitchen_solo()
        .args(["version", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(parsed["api_version"], 2);
}

#[test]
fn test_version_works_without_config_file() {
    kitchen_solo()
        .args(["--config", "/nonexistent/kitchen.yml", "version"])
        .assert()
        .success();
}

#[test]
fn test_unknown_subcommand_fails() {
    kitchen_solo()
        .arg("destroy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
