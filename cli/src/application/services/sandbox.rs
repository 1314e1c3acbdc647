//! Sandbox pipeline: the base step, then the provisioner's extension.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::application::ports::{LocalFs, Provisioner};
use crate::domain::ResolvedConfig;
use crate::domain::render::{DNA_FILENAME, render_dna_json};

/// Files present in a prepared sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedSandbox {
    pub root: PathBuf,
    pub dna: PathBuf,
    pub config_file: PathBuf,
    pub script: PathBuf,
}

/// Prepare `sandbox` for `provisioner`.
///
/// The base step (directory and `dna.json`) always runs first; the
/// provisioner only ever extends it. Nothing is cleaned up on failure.
///
/// # Errors
///
/// Returns an error if any staging step fails.
pub fn create_sandbox<P: Provisioner, F: LocalFs>(
    provisioner: &P,
    config: &ResolvedConfig,
    fs: &F,
    sandbox: &Path,
) -> Result<PreparedSandbox> {
    let dna = prepare_base(config, fs, sandbox)?;
    let script = provisioner.extend_sandbox(config, fs, sandbox)?;
    Ok(PreparedSandbox {
        root: sandbox.to_path_buf(),
        dna,
        config_file: sandbox.join(provisioner.config_filename()),
        script,
    })
}

fn prepare_base<F: LocalFs>(config: &ResolvedConfig, fs: &F, sandbox: &Path) -> Result<PathBuf> {
    fs.create_dir_all(sandbox)
        .with_context(|| format!("creating sandbox {}", sandbox.display()))?;
    info!("Preparing {DNA_FILENAME}");
    let path = sandbox.join(DNA_FILENAME);
    fs.write(&path, render_dna_json(config)?.as_bytes())?;
    Ok(path)
}
