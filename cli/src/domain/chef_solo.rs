//! Chef Solo command policy.
//!
//! Pure functions only. Given a `ResolvedConfig`, decide the remote command
//! line, the chef-solo arguments, and what the staged bootstrap script is
//! called. Writing files into the sandbox happens in the application layer.

use std::path::Path;

use crate::domain::defaults::{MAX_MULTIPLE_CONVERGE, ResolvedConfig};
use crate::domain::platform::Platform;
use crate::domain::render::DNA_FILENAME;

/// Provisioner API version advertised to the host framework.
pub const API_VERSION: u32 = 2;

/// Plugin version advertised to the host framework.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the rendered chef-solo configuration file.
pub const CONFIG_FILENAME: &str = "solo.rb";

/// Text echoed by the generated stub script.
pub const STUB_MESSAGE: &str = "NO BOOTSTRAP SCRIPT PRESENT";

/// A generated bootstrap script for when none is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubScript {
    pub filename: &'static str,
    pub content: &'static str,
}

const BOURNE_STUB: StubScript = StubScript {
    filename: "bootstrap.sh",
    content: "#!/bin/sh\necho \"NO BOOTSTRAP SCRIPT PRESENT\"\n",
};

const POWERSHELL_STUB: StubScript = StubScript {
    filename: "bootstrap.ps1",
    content: "Write-Host \"NO BOOTSTRAP SCRIPT PRESENT`n\"\n",
};

/// The stub script for the target's shell.
#[must_use]
pub fn stub_script(platform: Platform) -> StubScript {
    if platform.powershell_shell() {
        POWERSHELL_STUB
    } else {
        BOURNE_STUB
    }
}

/// Whether chef-solo gets the modern flag set (`--force-formatter`).
#[must_use]
pub fn is_modern(config: &ResolvedConfig) -> bool {
    config.require_chef_omnibus.supports_modern_cli()
}

/// Base name of the bootstrap script as staged in the sandbox.
///
/// The configured script keeps its own name; otherwise the stub's name is
/// used. This is known before the sandbox exists, so the run command never
/// depends on staging having happened first.
#[must_use]
pub fn script_basename(config: &ResolvedConfig) -> String {
    config
        .script
        .as_deref()
        .and_then(Path::file_name)
        .map_or_else(
            || stub_script(config.platform).filename.to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
}

/// chef-solo command line arguments, in a fixed order.
#[must_use]
pub fn chef_args(config: &ResolvedConfig, config_filename: &str) -> Vec<String> {
    let mut args = vec![
        format!(
            "--config {}",
            config.remote_path_join([config.root_path.as_str(), config_filename])
        ),
        format!("--log_level {}", config.log_level),
        "--no-color".to_string(),
        format!(
            "--json-attributes {}",
            config.remote_path_join([config.root_path.as_str(), DNA_FILENAME])
        ),
    ];
    if is_modern(config) {
        args.push("--force-formatter".to_string());
    }
    if let Some(log_file) = &config.log_file {
        args.push(format!("--logfile {log_file}"));
    }
    if config.profile_ruby {
        args.push("--profile-ruby".to_string());
    }
    if config.legacy_mode {
        args.push("--legacy-mode".to_string());
    }
    args
}

/// The fragment that runs the staged bootstrap script on the target.
#[must_use]
pub fn bootstrap_command(config: &ResolvedConfig) -> String {
    let name = script_basename(config);
    let script = config.remote_path_join([config.root_path.as_str(), name.as_str()]);
    let code = if config.platform.powershell_shell() {
        format!("& \"{script}\"")
    } else {
        config.sudo(&script)
    };
    config.prefix_command(&config.wrap_shell_code(&code))
}

/// The chef-solo invocation without arguments.
#[must_use]
pub fn solo_invocation(config: &ResolvedConfig) -> String {
    let cmd = config.sudo(&config.chef_solo_path);
    if config.platform.powershell_shell() {
        format!("& {cmd}")
    } else {
        cmd
    }
}

/// Combine `base` with the arguments, once per configured converge, each
/// run wrapped and prefixed, chained so a failure stops the rest.
#[must_use]
pub fn chef_cmd(config: &ResolvedConfig, base: &str) -> String {
    let args = chef_args(config, CONFIG_FILENAME);
    let one = std::iter::once(base.to_string())
        .chain(args)
        .collect::<Vec<_>>()
        .join(" ");
    let wrapped = config.prefix_command(&config.wrap_shell_code(&one));
    let runs = config.multiple_converge.clamp(1, MAX_MULTIPLE_CONVERGE) as usize;
    vec![wrapped; runs].join(config.platform.chain_separator())
}

/// Full command executed on the target: bootstrap, then converge.
#[must_use]
pub fn run_command(config: &ResolvedConfig) -> String {
    [
        bootstrap_command(config),
        chef_cmd(config, &solo_invocation(config)),
    ]
    .join(config.platform.chain_separator())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
