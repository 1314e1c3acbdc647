//! Integration tests for `kitchen-solo converge` against this host.
//!
//! A fake `chef-solo` stands in for the real one: it echoes its arguments
//! and exits with the code in `FAKE_CHEF_EXIT`.

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kitchen_solo() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kitchen-solo"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("KITCHEN_SOLO_CONFIG");
    cmd
}

fn write_executable(path: &Path, body: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
    std::fs::write(path, body).expect("write");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
}

/// Lay out a fake omnibus install plus a config converging into `root`.
fn fixture(extra: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let omnibus = dir.path().join("chef");
    write_executable(
        &omnibus.join("bin").join("chef-solo"),
        "#!/bin/sh\necho \"fake chef-solo $*\"\nexit \"${FAKE_CHEF_EXIT:-0}\"\n",
    );
    let root = dir.path().join("kitchen");
    let config = dir.path().join("kitchen.yml");
    std::fs::write(
        &config,
        format!(
            "provisioner:\n  sudo: false\n  chef_omnibus_root: {}\n  root_path: {}\n{extra}",
            omnibus.display(),
            root.display()
        ),
    )
    .expect("write config");
    (dir, config, root)
}

#[test]
fn test_converge_runs_bootstrap_then_chef() {
    let (dir, config, root) = fixture("");
    let script = dir.path().join("prepare.sh");
    write_executable(&script, "#!/bin/sh\necho bootstrapped\n");
    std::fs::write(
        &config,
        format!(
            "{}  script: {}\n",
            std::fs::read_to_string(&config).unwrap(),
            script.display()
        ),
    )
    .expect("append script");

    kitchen_solo()
        .arg("--config")
        .arg(&config)
        .arg("converge")
        .assert()
        .success()
        .stdout(predicate::str::contains("bootstrapped\nfake chef-solo"))
        .stdout(predicate::str::contains(format!(
            "--config {}/solo.rb",
            root.display()
        )));

    assert!(root.join("solo.rb").is_file());
    assert!(root.join("dna.json").is_file());
    assert!(root.join("prepare.sh").is_file());
}

#[test]
fn test_converge_stub_script_when_none_configured() {
    let (_dir, config, root) = fixture("");
    kitchen_solo()
        .arg("--config")
        .arg(&config)
        .arg("converge")
        .assert()
        .success()
        .stdout(predicate::str::contains("NO BOOTSTRAP SCRIPT PRESENT"));
    assert!(root.join("bootstrap.sh").is_file());
}

#[test]
fn test_converge_repeats_chef_run() {
    let (_dir, config, _root) = fixture("  multiple_converge: 2\n");
    let output = kitchen_solo()
        .arg("--config")
        .arg(&config)
        .arg("converge")
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("fake chef-solo").count(), 2);
}

#[test]
fn test_converge_failure_reports_exit_code() {
    let (_dir, config, _root) = fixture("");
    kitchen_solo()
        .env("FAKE_CHEF_EXIT", "7")
        .arg("--config")
        .arg(&config)
        .arg("converge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Converge failed with exit code 7"));
}

#[test]
fn test_converge_json_reports_command() {
    let (_dir, config, _root) = fixture("");
    let output = kitchen_solo()
        .arg("--json")
        .arg("--config")
        .arg(&config)
        .arg("converge")
        .output()
        .expect("run");
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert!(parsed["command"].as_str().unwrap().contains("bin/chef-solo"));
    assert!(parsed["stdout"].as_str().unwrap().contains("fake chef-solo"));
}
