//! Chef Solo provisioner: defaults, sandbox extension, and run command.
//!
//! Command policy lives in `crate::domain::chef_solo`; this module adds the
//! sandbox side effects through the `LocalFs` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::application::ports::{LocalFs, Provisioner};
use crate::domain::chef_solo::{CONFIG_FILENAME, run_command, stub_script};
use crate::domain::render::render_config_rb;
use crate::domain::{Platform, ProvisionerConfig, ResolvedConfig, resolve};

/// Permission bits of the staged bootstrap script.
pub const SCRIPT_MODE: u32 = 0o755;

/// The chef-solo provisioner for one target platform.
#[derive(Debug, Clone, Copy)]
pub struct ChefSolo {
    platform: Platform,
}

impl ChefSolo {
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    fn prepare_config_rb<F: LocalFs>(
        &self,
        config: &ResolvedConfig,
        fs: &F,
        sandbox: &Path,
    ) -> Result<()> {
        info!("Preparing {}", self.config_filename());
        let path = sandbox.join(self.config_filename());
        fs.write(&path, render_config_rb(config).as_bytes())
    }

    fn prepare_script<F: LocalFs>(
        &self,
        config: &ResolvedConfig,
        fs: &F,
        sandbox: &Path,
    ) -> Result<PathBuf> {
        info!("Preparing script");
        let staged = match &config.script {
            Some(script) => {
                debug!("Using script from {}", script.display());
                fs.copy_into(script, sandbox)
                    .with_context(|| format!("staging script {}", script.display()))?
            }
            None => self.prepare_stubbed_script(config, fs, sandbox)?,
        };
        fs.set_permissions(&staged, SCRIPT_MODE)?;
        Ok(staged)
    }

    /// Write a no-op script into the sandbox.
    fn prepare_stubbed_script<F: LocalFs>(
        &self,
        config: &ResolvedConfig,
        fs: &F,
        sandbox: &Path,
    ) -> Result<PathBuf> {
        let stub = stub_script(config.platform);
        warn!(
            "{} not found so a stubbed script will run. Is this intended?",
            stub.filename
        );
        let path = sandbox.join(stub.filename);
        fs.write(&path, stub.content.as_bytes())?;
        Ok(path)
    }
}

impl Provisioner for ChefSolo {
    fn config_filename(&self) -> &'static str {
        CONFIG_FILENAME
    }

    fn resolve_defaults(&self, base: &ProvisionerConfig) -> ResolvedConfig {
        resolve(base, self.platform)
    }

    fn extend_sandbox<F: LocalFs>(
        &self,
        config: &ResolvedConfig,
        fs: &F,
        sandbox: &Path,
    ) -> Result<PathBuf> {
        self.prepare_config_rb(config, fs, sandbox)?;
        self.prepare_script(config, fs, sandbox)
    }

    fn build_command(&self, config: &ResolvedConfig) -> String {
        run_command(config)
    }
}
