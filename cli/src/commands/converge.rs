//! `kitchen-solo converge`: stage, sync and run chef-solo on this host.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::converge::{DEFAULT_CONVERGE_TIMEOUT, converge};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::LocalFs;
use crate::infra::transfer::LocalTransfer;
use crate::output::json::to_pretty;

/// Arguments for `converge`.
#[derive(Args)]
pub struct ConvergeArgs {
    /// Converge timeout in seconds
    #[arg(long, default_value_t = DEFAULT_CONVERGE_TIMEOUT.as_secs())]
    pub timeout: u64,
}

/// Run the converge command.
pub async fn run(app: &AppContext, args: &ConvergeArgs) -> Result<ExitCode> {
    let (provisioner, config) = app.provisioner()?;
    let sandbox = tempfile::Builder::new()
        .prefix("kitchen-solo-")
        .tempdir()
        .context("creating sandbox directory")?;
    let timeout = Duration::from_secs(args.timeout);
    let runner = TokioCommandRunner::new(timeout);

    let outcome = converge(
        &provisioner,
        &config,
        &LocalFs,
        &LocalTransfer,
        &runner,
        sandbox.path(),
        timeout,
    )
    .await?;

    let stdout = String::from_utf8_lossy(&outcome.output.stdout);
    if app.is_json() {
        println!(
            "{}",
            to_pretty(&serde_json::json!({
                "command": outcome.command,
                "root_path": config.root_path,
                "stdout": stdout,
            }))?
        );
        return Ok(ExitCode::SUCCESS);
    }
    if !app.output.quiet {
        print!("{stdout}");
    }
    app.output
        .success(&format!("Converged into {}", config.root_path));
    Ok(ExitCode::SUCCESS)
}
