//! Command implementations

pub mod args;
pub mod command;
pub mod config;
pub mod converge;
pub mod sandbox;
pub mod version;
