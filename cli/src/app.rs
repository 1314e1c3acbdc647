//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is constructed once in `Cli::run()` and carries the output
//! settings and the configuration source. Provisioner state is loaded on
//! demand so commands like `version` work without a configuration file.

use anyhow::Result;

use crate::application::ports::{ConfigStore, Provisioner};
use crate::application::services::chef_solo::ChefSolo;
use crate::domain::ResolvedConfig;
use crate::infra::config::YamlConfigStore;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Where the provisioning configuration is read from.
    pub config_store: YamlConfigStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &OutputFlags, config_store: YamlConfigStore) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            config_store,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Load the configuration and resolve every provisioner default.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be found or parsed.
    pub fn provisioner(&self) -> Result<(ChefSolo, ResolvedConfig)> {
        let file = self.config_store.load()?;
        let provisioner = ChefSolo::new(file.platform.platform());
        let config = provisioner.resolve_defaults(&file.provisioner);
        tracing::debug!(
            path = %self.config_store.path().display(),
            solo_path = %config.chef_solo_path,
            "configuration resolved"
        );
        Ok((provisioner, config))
    }
}
