//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::{KitchenConfig, ProvisionerConfig, ResolvedConfig};

// ── Provisioner Port ──────────────────────────────────────────────────────────

/// A provisioner plugged into the sandbox pipeline.
///
/// The orchestrator calls these in order: `resolve_defaults` once, then
/// `extend_sandbox` after the base sandbox step, then `build_command`.
pub trait Provisioner {
    /// Name of the rendered configuration file inside the sandbox.
    fn config_filename(&self) -> &'static str;

    /// Fill every unset option from its default.
    fn resolve_defaults(&self, base: &ProvisionerConfig) -> ResolvedConfig;

    /// Add provisioner files to a sandbox the base step already created.
    /// Returns the path of the staged bootstrap script.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be written, copied, or chmodded.
    fn extend_sandbox<F: LocalFs>(
        &self,
        config: &ResolvedConfig,
        fs: &F,
        sandbox: &Path,
    ) -> Result<PathBuf>;

    /// The command line executed on the target.
    fn build_command(&self, config: &ResolvedConfig) -> String;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts where the provisioning configuration comes from.
pub trait ConfigStore {
    /// Load and parse the configuration.
    fn load(&self) -> Result<KitchenConfig>;
    /// Location the configuration is read from.
    fn path(&self) -> &Path;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the local filesystem operations used to stage a sandbox.
pub trait LocalFs {
    /// Create `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Write `content` to `path`, replacing any existing file.
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;
    /// Copy a file or a directory tree into `dest_dir`, keeping its base name.
    /// Returns the path of the copy.
    fn copy_into(&self, source: &Path, dest_dir: &Path) -> Result<PathBuf>;
    /// Set unix permission bits on `path`. A no-op on other platforms.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;
}

// ── Transfer Port ─────────────────────────────────────────────────────────────

/// Moves a prepared sandbox onto the target.
#[allow(async_fn_in_trait)]
pub trait FileTransfer {
    /// Recursively copy the contents of `local` into `remote` on the target.
    async fn transfer_recursive(&self, local: &Path, remote: &str) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}
