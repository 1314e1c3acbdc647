//! Target platform conventions.
//!
//! Paths and shell fragments built here run on the *target*, so they follow
//! the target's separator and shell syntax, never the local host's.

use serde::{Deserialize, Serialize};

/// Operating system family of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsType {
    #[default]
    Unix,
    Windows,
}

/// Shell the target executes commands with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellType {
    Bourne,
    Powershell,
}

/// Resolved target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub os_type: OsType,
    pub shell_type: ShellType,
}

impl Default for Platform {
    fn default() -> Self {
        Self::new(OsType::Unix, None)
    }
}

impl Platform {
    /// Build a platform, picking the OS's native shell when none is given.
    #[must_use]
    pub fn new(os_type: OsType, shell_type: Option<ShellType>) -> Self {
        let shell_type = shell_type.unwrap_or(match os_type {
            OsType::Unix => ShellType::Bourne,
            OsType::Windows => ShellType::Powershell,
        });
        Self {
            os_type,
            shell_type,
        }
    }

    #[must_use]
    pub fn windows_os(&self) -> bool {
        self.os_type == OsType::Windows
    }

    #[must_use]
    pub fn powershell_shell(&self) -> bool {
        self.shell_type == ShellType::Powershell
    }

    /// Path separator of the target filesystem.
    #[must_use]
    pub fn separator(&self) -> char {
        if self.windows_os() { '\\' } else { '/' }
    }

    /// Join path segments using the target's separator.
    ///
    /// Separators inside each segment are normalised, and a segment that
    /// already ends with a separator is not doubled. Empty segments are
    /// joined as-is, so `["", "bin"]` yields `/bin`.
    pub fn remote_path_join<I, S>(&self, parts: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sep = self.separator();
        let mut path = String::new();
        for (i, part) in parts.into_iter().enumerate() {
            let part: String = part
                .as_ref()
                .chars()
                .map(|c| if c == '/' || c == '\\' { sep } else { c })
                .collect();
            if i > 0 && !path.ends_with(sep) {
                path.push(sep);
            }
            if i > 0 {
                path.push_str(part.trim_start_matches(sep));
            } else {
                path.push_str(&part);
            }
        }
        path
    }

    /// Separator placed between commands that must all succeed.
    #[must_use]
    pub fn chain_separator(&self) -> &'static str {
        if self.windows_os() {
            "; if ($LastExitCode -ne 0) { throw \"Command failed with exit code $LastExitCode.\" } ;"
        } else {
            " && "
        }
    }

    /// One line that sets and exports an environment variable.
    #[must_use]
    pub fn env_var(&self, name: &str, value: &str) -> String {
        if self.powershell_shell() {
            format!("$env:{name} = \"{value}\"")
        } else {
            format!("{name}=\"{value}\"; export {name}")
        }
    }

    /// Wrap a code fragment, preceded by `env` lines, so it can be chained
    /// onto a larger command.
    ///
    /// Bourne fragments run in their own `sh -c` so variable exports stay
    /// local to the fragment.
    #[must_use]
    pub fn wrap_shell_code(&self, env: &[String], code: &str) -> String {
        let mut body = env.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(code);
        if self.powershell_shell() {
            return body;
        }
        if !body.ends_with('\n') {
            body.push('\n');
        }
        format!("sh -c '\n{body}'")
    }
}
