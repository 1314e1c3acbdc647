//! Converge use-case: stage a sandbox, sync it to the target, run chef.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::application::ports::{CommandRunner, FileTransfer, LocalFs, Provisioner};
use crate::application::services::sandbox::{PreparedSandbox, create_sandbox};
use crate::domain::{ConvergeError, ResolvedConfig};

/// Default upper bound on a single converge.
pub const DEFAULT_CONVERGE_TIMEOUT: Duration = Duration::from_secs(3600);

/// Result of a successful converge.
#[derive(Debug)]
pub struct ConvergeOutcome {
    pub sandbox: PreparedSandbox,
    pub command: String,
    pub output: Output,
}

/// Run the full pipeline against one target.
///
/// `sandbox` is a scratch directory owned by the caller; it is synced into
/// `root_path` before the command runs.
///
/// # Errors
///
/// Returns an error if staging or transfer fails, the command cannot be
/// run, or it exits unsuccessfully.
pub async fn converge<P, F, T, R>(
    provisioner: &P,
    config: &ResolvedConfig,
    fs: &F,
    transfer: &T,
    runner: &R,
    sandbox: &Path,
    timeout: Duration,
) -> Result<ConvergeOutcome>
where
    P: Provisioner,
    F: LocalFs,
    T: FileTransfer,
    R: CommandRunner,
{
    let prepared = create_sandbox(provisioner, config, fs, sandbox)?;

    info!(root_path = %config.root_path, "Transferring sandbox");
    transfer
        .transfer_recursive(sandbox, &config.root_path)
        .await
        .with_context(|| format!("transferring sandbox to {}", config.root_path))?;

    let command = provisioner.build_command(config);
    let (program, flag) = if config.platform.powershell_shell() {
        ("powershell", "-Command")
    } else {
        ("sh", "-c")
    };
    info!(program, "Running converge");
    let output = runner
        .run_with_timeout(program, &[flag, command.as_str()], timeout)
        .await
        .context("running converge command")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(match output.status.code() {
            Some(code) => ConvergeError::CommandFailed { code, stderr },
            None => ConvergeError::Terminated { stderr },
        }
        .into());
    }

    Ok(ConvergeOutcome {
        sandbox: prepared,
        command,
        output,
    })
}
