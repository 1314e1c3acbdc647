//! Domain types for the provisioning configuration file.
//!
//! Pure types only: no I/O, no async, no filesystem access. Defaults are
//! not applied here; see `crate::domain::defaults`.

use std::path::PathBuf;

use semver::{Prerelease, Version};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::platform::{OsType, Platform, ShellType};

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration file, e.g. `kitchen.yml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    /// Target platform description.
    pub platform: PlatformConfig,
    /// Provisioner options.
    pub provisioner: ProvisionerConfig,
}

/// Target platform as written in the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// `unix` (default) or `windows`.
    pub os_type: OsType,
    /// `bourne` or `powershell`. Follows `os_type` when omitted.
    pub shell_type: Option<ShellType>,
}

impl PlatformConfig {
    /// Resolve the shell default for the configured OS.
    #[must_use]
    pub fn platform(&self) -> Platform {
        Platform::new(self.os_type, self.shell_type)
    }
}

/// Provisioner options exactly as supplied by the user.
///
/// Every field left out of the file is filled by the default resolution
/// pipeline before any command logic reads it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProvisionerConfig {
    pub chef_omnibus_root: Option<String>,
    pub chef_solo_path: Option<String>,
    /// Local path to a bootstrap script (file or directory).
    pub script: Option<PathBuf>,
    pub root_path: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub profile_ruby: bool,
    pub legacy_mode: bool,
    pub require_chef_omnibus: RequiredVersion,
    /// Extra `solo.rb` settings, merged over the generated ones.
    pub solo_rb: Map<String, Value>,
    pub run_list: Vec<String>,
    /// Node attributes written to `dna.json`.
    pub attributes: Map<String, Value>,
    pub node_name: Option<String>,
    pub deprecations_as_errors: bool,
    pub sudo: Option<bool>,
    pub sudo_command: Option<String>,
    pub command_prefix: Option<String>,
    pub multiple_converge: Option<u32>,
    pub http_proxy: Option<String>,
    pub https_proxy: Option<String>,
    pub ftp_proxy: Option<String>,
    pub no_proxy: Option<String>,
}

// ── Required version ─────────────────────────────────────────────────────────

/// Value of `require_chef_omnibus`.
///
/// The file may hold a boolean, a bare number, a version string, `latest`, or
/// anything else; each shape maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<RawRequiredVersion>", into = "Option<RawRequiredVersion>")]
pub enum RequiredVersion {
    #[default]
    Unset,
    Bool(bool),
    Latest,
    Version(Version),
    Other(String),
}

impl RequiredVersion {
    /// Interpret a textual value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "latest" {
            return Self::Latest;
        }
        match parse_gem_version(value) {
            Some(version) => Self::Version(version),
            None => Self::Other(value.to_string()),
        }
    }

    /// Whether the pinned chef supports `--force-formatter` and friends.
    ///
    /// Only an explicit pin below 11.0 turns the modern flag set off.
    #[must_use]
    pub fn supports_modern_cli(&self) -> bool {
        match self {
            Self::Unset | Self::Bool(_) | Self::Latest | Self::Other(_) => true,
            Self::Version(version) => *version >= Version::new(11, 0, 0),
        }
    }
}

/// Shapes `require_chef_omnibus` can take in YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRequiredVersion {
    Flag(bool),
    Integer(u64),
    Float(f64),
    Text(String),
    /// Lists, mappings and anything else YAML allows.
    Structured(Value),
}

impl From<Option<RawRequiredVersion>> for RequiredVersion {
    fn from(raw: Option<RawRequiredVersion>) -> Self {
        match raw {
            None => Self::Unset,
            Some(RawRequiredVersion::Flag(flag)) => Self::Bool(flag),
            Some(RawRequiredVersion::Integer(major)) => Self::Version(Version::new(major, 0, 0)),
            Some(RawRequiredVersion::Float(number)) => Self::parse(&number.to_string()),
            Some(RawRequiredVersion::Text(text)) => Self::parse(&text),
            Some(RawRequiredVersion::Structured(value)) => Self::Other(value.to_string()),
        }
    }
}

impl From<RequiredVersion> for Option<RawRequiredVersion> {
    fn from(value: RequiredVersion) -> Self {
        match value {
            RequiredVersion::Unset => None,
            RequiredVersion::Bool(flag) => Some(RawRequiredVersion::Flag(flag)),
            RequiredVersion::Latest => Some(RawRequiredVersion::Text("latest".to_string())),
            RequiredVersion::Version(version) => Some(RawRequiredVersion::Text(version.to_string())),
            RequiredVersion::Other(text) => Some(RawRequiredVersion::Text(text)),
        }
    }
}

/// One RubyGems version segment: a run of digits or a run of letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GemSegment<'a> {
    Number(u64),
    Letters(&'a str),
}

/// Whether `value` has the shape RubyGems accepts: dotted alphanumeric
/// segments starting with a numeric one, plus an optional `-` suffix.
fn is_gem_version(value: &str) -> bool {
    let (release, suffix) = match value.split_once('-') {
        Some((release, suffix)) => (release, Some(suffix)),
        None => (value, None),
    };
    let mut segments = release.split('.');
    let leading_digits = segments
        .next()
        .is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()));
    let release_ok =
        segments.all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric()));
    let suffix_ok = suffix.is_none_or(|suffix| {
        suffix
            .split('.')
            .all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'))
    });
    leading_digits && release_ok && suffix_ok
}

/// Split a version into digit and letter runs, `-` reading as `.pre.`.
fn gem_segments(value: &str) -> Option<Vec<GemSegment<'_>>> {
    let mut segments = Vec::new();
    let bytes = value.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        if !bytes[start].is_ascii_alphanumeric() {
            if bytes[start] == b'-' {
                segments.push(GemSegment::Letters("pre"));
            }
            start += 1;
            continue;
        }
        let digits = bytes[start].is_ascii_digit();
        let len = bytes[start..]
            .iter()
            .take_while(|b| {
                if digits {
                    b.is_ascii_digit()
                } else {
                    b.is_ascii_alphabetic()
                }
            })
            .count();
        let run = &value[start..start + len];
        segments.push(if digits {
            GemSegment::Number(run.parse().ok()?)
        } else {
            GemSegment::Letters(run)
        });
        start += len;
    }
    Some(segments)
}

/// Parse a RubyGems-style version string.
///
/// Segments split into digit and letter runs (`11.1a` is `11.1.a`) and a
/// `-` reads as `.pre.` (`10.0-rc1` is `10.0.pre.rc.1`). Up to three
/// leading numbers form the release; everything from the first letter run
/// on is the pre-release, so `11.0.rc.1` sorts before `11.0`. Numbers past
/// the patch level are dropped, and a non-zero one drops the pre-release
/// too, since `11.0.0.1.rc` still sorts after `11.0.0`.
#[must_use]
pub fn parse_gem_version(value: &str) -> Option<Version> {
    let value = value.trim();
    if !is_gem_version(value) {
        return None;
    }
    let segments = gem_segments(value)?;
    let split = segments
        .iter()
        .position(|s| matches!(s, GemSegment::Letters(_)))
        .unwrap_or(segments.len());
    let (release, pre) = segments.split_at(split);
    let numbers: Vec<u64> = release
        .iter()
        .filter_map(|s| match s {
            GemSegment::Number(n) => Some(*n),
            GemSegment::Letters(_) => None,
        })
        .collect();

    let (&major, rest) = numbers.split_first()?;
    let mut version = Version::new(
        major,
        rest.first().copied().unwrap_or(0),
        rest.get(1).copied().unwrap_or(0),
    );
    let truncated_above_zero = rest.iter().skip(2).any(|&n| n > 0);
    if !pre.is_empty() && !truncated_above_zero {
        let identifiers: Vec<String> = pre
            .iter()
            .map(|s| match s {
                GemSegment::Number(n) => n.to_string(),
                GemSegment::Letters(l) => (*l).to_string(),
            })
            .collect();
        version.pre = Prerelease::new(&identifiers.join(".")).ok()?;
    }
    Some(version)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
