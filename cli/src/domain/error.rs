//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to loading the provisioning configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}\n\nPass --config <path> or set KITCHEN_SOLO_CONFIG.")]
    NotFound(String),
}

// ── Converge errors ───────────────────────────────────────────────────────────

/// Errors raised while running a converge against a target.
#[derive(Debug, Error)]
pub enum ConvergeError {
    #[error("Converge failed with exit code {code}:\n{stderr}")]
    CommandFailed { code: i32, stderr: String },

    #[error("Converge was terminated by a signal:\n{stderr}")]
    Terminated { stderr: String },
}
