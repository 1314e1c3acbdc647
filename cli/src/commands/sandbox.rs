//! `kitchen-solo sandbox`: stage the sandbox into a local directory.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::sandbox::create_sandbox;
use crate::infra::fs::LocalFs;
use crate::output::json::to_pretty;

/// Arguments for `sandbox`.
#[derive(Args)]
pub struct SandboxArgs {
    /// Directory to stage into (created if missing)
    pub dir: PathBuf,
}

/// Run the sandbox command.
pub fn run(app: &AppContext, args: &SandboxArgs) -> Result<ExitCode> {
    let (provisioner, config) = app.provisioner()?;
    let prepared = create_sandbox(&provisioner, &config, &LocalFs, &args.dir)?;
    if app.is_json() {
        println!("{}", to_pretty(&prepared)?);
        return Ok(ExitCode::SUCCESS);
    }
    app.output
        .success(&format!("Sandbox ready at {}", prepared.root.display()));
    app.output.kv("attributes", &prepared.dna.display().to_string());
    app.output
        .kv("config", &prepared.config_file.display().to_string());
    app.output.kv("script", &prepared.script.display().to_string());
    Ok(ExitCode::SUCCESS)
}
