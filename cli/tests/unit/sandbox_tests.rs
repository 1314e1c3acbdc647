//! Unit tests for sandbox staging through the real filesystem adapter.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use kitchen_solo::application::ports::Provisioner;
use kitchen_solo::application::services::chef_solo::ChefSolo;
use kitchen_solo::application::services::sandbox::create_sandbox;
use kitchen_solo::domain::{OsType, Platform, ProvisionerConfig, ResolvedConfig, ShellType};
use kitchen_solo::infra::fs::LocalFs;

fn provisioner(os: OsType, shell: Option<ShellType>) -> ChefSolo {
    ChefSolo::new(Platform::new(os, shell))
}

fn resolved(provisioner: &ChefSolo, yaml: &str) -> ResolvedConfig {
    let base: ProvisionerConfig = serde_yaml::from_str(yaml).expect("valid yaml");
    provisioner.resolve_defaults(&base)
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read")
}

#[test]
fn test_sandbox_contains_dna_config_and_stub() {
    let dir = tempfile::tempdir().expect("tempdir");
    let chef = provisioner(OsType::Unix, None);
    let config = resolved(&chef, "run_list: ['recipe[base]']\n");

    let prepared = create_sandbox(&chef, &config, &LocalFs, dir.path()).expect("sandbox");

    assert_eq!(prepared.dna, dir.path().join("dna.json"));
    assert_eq!(prepared.config_file, dir.path().join("solo.rb"));
    assert_eq!(prepared.script, dir.path().join("bootstrap.sh"));
    assert!(read(&prepared.dna).contains("recipe[base]"));
    assert!(read(&prepared.config_file).contains("file_cache_path \"/tmp/kitchen/cache\""));
    assert_eq!(
        read(&prepared.script),
        "#!/bin/sh\necho \"NO BOOTSTRAP SCRIPT PRESENT\"\n"
    );
}

#[test]
fn test_sandbox_creates_missing_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("a").join("b");
    let chef = provisioner(OsType::Unix, None);
    let config = resolved(&chef, "{}");

    create_sandbox(&chef, &config, &LocalFs, &nested).expect("sandbox");

    assert!(nested.join("dna.json").is_file());
}

#[test]
fn test_sandbox_stub_follows_shell_type() {
    let dir = tempfile::tempdir().expect("tempdir");
    let chef = provisioner(OsType::Windows, None);
    let config = resolved(&chef, "{}");

    let prepared = create_sandbox(&chef, &config, &LocalFs, dir.path()).expect("sandbox");

    assert_eq!(prepared.script, dir.path().join("bootstrap.ps1"));
    assert!(read(&prepared.script).starts_with("Write-Host"));
    assert!(!dir.path().join("bootstrap.sh").exists());
}

#[test]
fn test_sandbox_copies_configured_script_byte_for_byte() {
    let src = tempfile::tempdir().expect("tempdir");
    let dir = tempfile::tempdir().expect("tempdir");
    let script = src.path().join("prepare.sh");
    let body = b"#!/bin/sh\nset -e\napt-get update\n";
    std::fs::write(&script, body).expect("write");

    let chef = provisioner(OsType::Unix, None);
    let config = resolved(&chef, &format!("script: {}\n", script.display()));
    let prepared = create_sandbox(&chef, &config, &LocalFs, dir.path()).expect("sandbox");

    assert_eq!(prepared.script, dir.path().join("prepare.sh"));
    assert_eq!(std::fs::read(&prepared.script).expect("read"), body);
    assert!(!dir.path().join("bootstrap.sh").exists());
}

#[cfg(unix)]
#[test]
fn test_sandbox_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let src = tempfile::tempdir().expect("tempdir");
    let dir = tempfile::tempdir().expect("tempdir");
    let script = src.path().join("prepare.sh");
    std::fs::write(&script, b"#!/bin/sh\n").expect("write");
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o600)).expect("chmod");

    let chef = provisioner(OsType::Unix, None);
    let config = resolved(&chef, &format!("script: {}\n", script.display()));
    let prepared = create_sandbox(&chef, &config, &LocalFs, dir.path()).expect("sandbox");

    let mode = std::fs::metadata(&prepared.script)
        .expect("meta")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn test_sandbox_missing_script_fails_with_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let chef = provisioner(OsType::Unix, None);
    let config = resolved(&chef, "script: /nonexistent/kitchen/prepare.sh\n");

    let err = create_sandbox(&chef, &config, &LocalFs, dir.path()).unwrap_err();

    assert!(
        format!("{err:#}").contains("/nonexistent/kitchen/prepare.sh"),
        "got: {err:#}"
    );
    // The base step ran before the failure and is left in place.
    assert!(dir.path().join("dna.json").is_file());
}

#[test]
fn test_sandbox_solo_rb_carries_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let chef = provisioner(OsType::Unix, None);
    let config = resolved(&chef, "solo_rb:\n  log_location: STDOUT\n");

    let prepared = create_sandbox(&chef, &config, &LocalFs, dir.path()).expect("sandbox");

    assert!(read(&prepared.config_file).ends_with("log_location \"STDOUT\"\n"));
}
