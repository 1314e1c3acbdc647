//! Version command

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::domain::chef_solo::{API_VERSION, PLUGIN_VERSION};
use crate::output::json::to_pretty;

/// Run the version command.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    if app.is_json() {
        println!(
            "{}",
            to_pretty(&serde_json::json!({
                "version": PLUGIN_VERSION,
                "api_version": API_VERSION,
            }))?
        );
    } else {
        println!("kitchen-solo {PLUGIN_VERSION} (provisioner API v{API_VERSION})");
    }
    Ok(ExitCode::SUCCESS)
}
