//! `kitchen-solo args`: print the chef-solo arguments.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::chef_solo::{CONFIG_FILENAME, chef_args, is_modern};
use crate::output::json::to_pretty;

/// Arguments for `args`.
#[derive(Args)]
pub struct ArgsArgs {
    /// Configuration file name the arguments point at
    #[arg(long, default_value = CONFIG_FILENAME)]
    pub config_file: String,
}

/// Run the args command.
pub fn run(app: &AppContext, args: &ArgsArgs) -> Result<ExitCode> {
    let (_, config) = app.provisioner()?;
    let list = chef_args(&config, &args.config_file);
    if app.is_json() {
        println!(
            "{}",
            to_pretty(&serde_json::json!({
                "modern": is_modern(&config),
                "args": list,
            }))?
        );
    } else {
        for arg in &list {
            println!("{arg}");
        }
    }
    Ok(ExitCode::SUCCESS)
}
