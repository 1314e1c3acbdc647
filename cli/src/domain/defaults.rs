//! Default resolution for provisioner options.
//!
//! Defaults are an ordered list of `(key, resolver)` pairs. Each resolver
//! reads the user's `ProvisionerConfig` (never mutated) plus whatever earlier
//! resolvers produced, and fills exactly one key of the `ResolvedConfig`.
//! Later keys may depend on earlier ones, e.g. `chef_solo_path` on
//! `chef_omnibus_root`.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::config::{ProvisionerConfig, RequiredVersion};
use crate::domain::platform::Platform;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_LOG_LEVEL: &str = "auto";
pub const LEGACY_LOG_LEVEL: &str = "info";
pub const DEFAULT_SUDO_COMMAND: &str = "sudo -E";
/// Upper bound on chef runs per converge.
pub const MAX_MULTIPLE_CONVERGE: u32 = 100;

const UNIX_ROOT_PATH: &str = "/tmp/kitchen";
const WINDOWS_ROOT_PATH: &str = "$env:TEMP\\kitchen";
const UNIX_OMNIBUS_ROOT: &str = "/opt/chef";
const WINDOWS_OMNIBUS_ROOT: &str = "$env:systemdrive\\opscode\\chef";

const PROXY_VARS: &[&str] = &["http_proxy", "https_proxy", "ftp_proxy", "no_proxy"];

// ── Resolved config ──────────────────────────────────────────────────────────

/// Fully defaulted provisioner options. Every command-building operation
/// reads this value, never the raw `ProvisionerConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub platform: Platform,
    pub root_path: String,
    pub chef_omnibus_root: String,
    pub chef_solo_path: String,
    pub script: Option<PathBuf>,
    pub require_chef_omnibus: RequiredVersion,
    pub log_level: String,
    pub log_file: Option<String>,
    pub profile_ruby: bool,
    pub legacy_mode: bool,
    pub solo_rb: Map<String, Value>,
    pub run_list: Vec<String>,
    pub attributes: Map<String, Value>,
    pub node_name: Option<String>,
    pub deprecations_as_errors: bool,
    pub sudo: bool,
    pub sudo_command: String,
    pub command_prefix: Option<String>,
    pub multiple_converge: u32,
    /// `(variable, value)` for each configured proxy.
    pub proxies: Vec<(String, String)>,
}

impl ResolvedConfig {
    /// Join remote path segments with the target's separator.
    pub fn remote_path_join<I, S>(&self, parts: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.platform.remote_path_join(parts)
    }

    /// Run `script` through the configured elevation command.
    #[must_use]
    pub fn sudo(&self, script: &str) -> String {
        if self.sudo {
            format!("{} {script}", self.sudo_command)
        } else {
            script.to_string()
        }
    }

    /// Prepend the user's `command_prefix`, if any.
    #[must_use]
    pub fn prefix_command(&self, script: &str) -> String {
        match &self.command_prefix {
            Some(prefix) => format!("{prefix} {script}"),
            None => script.to_string(),
        }
    }

    /// Wrap a fragment with the proxy and `TEST_KITCHEN` exports.
    #[must_use]
    pub fn wrap_shell_code(&self, code: &str) -> String {
        let mut env: Vec<String> = Vec::new();
        for (name, value) in &self.proxies {
            env.push(self.platform.env_var(name, value));
            env.push(self.platform.env_var(&name.to_uppercase(), value));
        }
        env.push(self.platform.env_var("TEST_KITCHEN", "1"));
        self.platform.wrap_shell_code(&env, code)
    }
}

// ── Resolution pipeline ──────────────────────────────────────────────────────

/// Fills one key of the resolved config.
pub type Resolver = fn(&ProvisionerConfig, &mut ResolvedConfig);

/// Resolvers in evaluation order.
pub const DEFAULT_RESOLVERS: &[(&str, Resolver)] = &[
    ("root_path", resolve_root_path),
    ("chef_omnibus_root", resolve_chef_omnibus_root),
    ("chef_solo_path", resolve_chef_solo_path),
    ("script", resolve_script),
    ("require_chef_omnibus", resolve_require_chef_omnibus),
    ("log_level", resolve_log_level),
    ("log_file", resolve_log_file),
    ("profile_ruby", resolve_profile_ruby),
    ("legacy_mode", resolve_legacy_mode),
    ("solo_rb", resolve_solo_rb),
    ("run_list", resolve_run_list),
    ("attributes", resolve_attributes),
    ("node_name", resolve_node_name),
    ("deprecations_as_errors", resolve_deprecations_as_errors),
    ("sudo", resolve_sudo),
    ("sudo_command", resolve_sudo_command),
    ("command_prefix", resolve_command_prefix),
    ("multiple_converge", resolve_multiple_converge),
    ("proxies", resolve_proxies),
];

/// Produce the fully resolved configuration for `platform`.
#[must_use]
pub fn resolve(base: &ProvisionerConfig, platform: Platform) -> ResolvedConfig {
    let mut resolved = ResolvedConfig {
        platform,
        ..ResolvedConfig::default()
    };
    for (_key, resolver) in DEFAULT_RESOLVERS {
        resolver(base, &mut resolved);
    }
    resolved
}

/// `chef_solo_path` when set, otherwise `<omnibus root>/bin/chef-solo`
/// (`.bat` on Windows).
#[must_use]
pub fn resolve_solo_path(
    chef_solo_path: Option<&str>,
    chef_omnibus_root: &str,
    platform: Platform,
) -> String {
    if let Some(path) = chef_solo_path {
        return path.to_string();
    }
    let mut path = platform.remote_path_join([chef_omnibus_root, "bin", "chef-solo"]);
    if platform.windows_os() {
        path.push_str(".bat");
    }
    path
}

fn resolve_root_path(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    let fallback = if out.platform.windows_os() {
        WINDOWS_ROOT_PATH
    } else {
        UNIX_ROOT_PATH
    };
    out.root_path = base
        .root_path
        .clone()
        .unwrap_or_else(|| fallback.to_string());
}

fn resolve_chef_omnibus_root(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    let fallback = if out.platform.windows_os() {
        WINDOWS_OMNIBUS_ROOT
    } else {
        UNIX_OMNIBUS_ROOT
    };
    out.chef_omnibus_root = base
        .chef_omnibus_root
        .clone()
        .unwrap_or_else(|| fallback.to_string());
}

fn resolve_chef_solo_path(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.chef_solo_path =
        resolve_solo_path(base.chef_solo_path.as_deref(), &out.chef_omnibus_root, out.platform);
}

fn resolve_script(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.script.clone_from(&base.script);
}

fn resolve_require_chef_omnibus(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.require_chef_omnibus = base.require_chef_omnibus.clone();
}

/// Pre-11 chef has no `auto` level, so an unset (or `auto`) level falls
/// back to `info` there. An explicit level is always kept.
fn resolve_log_level(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    let level = base.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
    let legacy = !out.require_chef_omnibus.supports_modern_cli();
    out.log_level = if legacy && level == DEFAULT_LOG_LEVEL {
        LEGACY_LOG_LEVEL.to_string()
    } else {
        level.to_string()
    };
}

fn resolve_log_file(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.log_file.clone_from(&base.log_file);
}

fn resolve_profile_ruby(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.profile_ruby = base.profile_ruby;
}

fn resolve_legacy_mode(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.legacy_mode = base.legacy_mode;
}

fn resolve_solo_rb(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.solo_rb.clone_from(&base.solo_rb);
}

fn resolve_run_list(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.run_list.clone_from(&base.run_list);
}

fn resolve_attributes(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.attributes.clone_from(&base.attributes);
}

fn resolve_node_name(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.node_name.clone_from(&base.node_name);
}

fn resolve_deprecations_as_errors(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.deprecations_as_errors = base.deprecations_as_errors;
}

fn resolve_sudo(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.sudo = base.sudo.unwrap_or(!out.platform.windows_os());
}

fn resolve_sudo_command(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.sudo_command = base
        .sudo_command
        .clone()
        .unwrap_or_else(|| DEFAULT_SUDO_COMMAND.to_string());
}

fn resolve_command_prefix(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.command_prefix = base.command_prefix.clone().filter(|p| !p.is_empty());
}

fn resolve_multiple_converge(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    out.multiple_converge = base
        .multiple_converge
        .unwrap_or(1)
        .clamp(1, MAX_MULTIPLE_CONVERGE);
}

fn resolve_proxies(base: &ProvisionerConfig, out: &mut ResolvedConfig) {
    let values = [&base.http_proxy, &base.https_proxy, &base.ftp_proxy, &base.no_proxy];
    out.proxies = PROXY_VARS
        .iter()
        .zip(values)
        .filter_map(|(name, value)| value.as_ref().map(|v| ((*name).to_string(), v.clone())))
        .collect();
}

// ── Unit tests ───────────────────────────────────────────────────────────────
