//! Domain layer: pure provisioning policy, types, and rendering.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod chef_solo;
pub mod config;
pub mod defaults;
pub mod error;
pub mod platform;
pub mod render;

pub use config::{KitchenConfig, PlatformConfig, ProvisionerConfig, RequiredVersion};
pub use defaults::{ResolvedConfig, resolve, resolve_solo_path};
pub use error::{ConfigError, ConvergeError};
pub use platform::{OsType, Platform, ShellType};
