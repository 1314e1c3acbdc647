//! `kitchen-solo config`: show the resolved provisioner configuration.

use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::domain::chef_solo::is_modern;
use crate::output::json::to_pretty;

/// Run the config command.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let (_, config) = app.provisioner()?;
    if app.is_json() {
        println!(
            "{}",
            to_pretty(&serde_json::json!({
                "path": app.config_store.path(),
                "modern": is_modern(&config),
                "provisioner": config,
            }))?
        );
        return Ok(ExitCode::SUCCESS);
    }
    app.output.header(&format!(
        "Provisioner configuration ({})",
        app.config_store.path().display()
    ));
    app.output
        .kv("modern", if is_modern(&config) { "yes" } else { "no" });
    let yaml = serde_yaml::to_string(&config).context("cannot serialize config")?;
    print!("{yaml}");
    Ok(ExitCode::SUCCESS)
}
