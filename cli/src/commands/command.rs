//! `kitchen-solo command`: print the command run on the target.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::Provisioner;
use crate::output::json::to_pretty;

/// Run the command command.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let (provisioner, config) = app.provisioner()?;
    let command = provisioner.build_command(&config);
    if app.is_json() {
        println!("{}", to_pretty(&serde_json::json!({ "command": command }))?);
    } else {
        println!("{command}");
    }
    Ok(ExitCode::SUCCESS)
}
