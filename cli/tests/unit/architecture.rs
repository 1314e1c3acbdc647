//! Structural tests for layer boundary enforcement.
//!
//! These scan source files to verify that the domain and application layers
//! stay free of infrastructure and presentation imports.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Read a file and strip comment lines to avoid false positives.
fn read_non_comment_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

/// Lines under `src/<layer>` containing any forbidden pattern.
fn violations(layer: &str, forbidden: &[&str]) -> Vec<String> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer);
    let mut found = Vec::new();
    for file in collect_rs_files(&root) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            for pattern in forbidden {
                if line.contains(pattern) {
                    found.push(format!("{rel}:{}: `{pattern}` in: {line}", i + 1));
                }
            }
        }
    }
    found
}

#[test]
fn test_domain_has_no_io_or_outer_layer_imports() {
    let found = violations(
        "domain",
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "std::fs",
            "std::process",
            "tokio",
        ],
    );
    assert!(found.is_empty(), "domain boundary violations:\n{}", found.join("\n"));
}

#[test]
fn test_application_does_not_import_infra_or_output() {
    let found = violations(
        "application",
        &["crate::infra", "crate::commands", "crate::output", "std::fs"],
    );
    assert!(
        found.is_empty(),
        "application boundary violations:\n{}",
        found.join("\n")
    );
}

#[test]
fn test_commands_do_not_branch_on_raw_json_flag() {
    let found = violations("commands", &["json: bool", "if json", "if !json"]);
    assert!(found.is_empty(), "inline JSON branching:\n{}", found.join("\n"));
}
