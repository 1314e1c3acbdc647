//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;
use crate::infra::config::{DEFAULT_CONFIG_FILE, YamlConfigStore};

/// Chef Solo provisioner for test targets
#[derive(Parser)]
#[command(
    name = "kitchen-solo",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Provisioning configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "KITCHEN_SOLO_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the command run on the target
    Command,

    /// Print the chef-solo arguments
    Args(commands::args::ArgsArgs),

    /// Stage the sandbox into a directory
    Sandbox(commands::sandbox::SandboxArgs),

    /// Show the resolved provisioner configuration
    Config,

    /// Stage, sync and converge on this host
    Converge(commands::converge::ConvergeArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            config,
            json,
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;
        let app = AppContext::new(
            &OutputFlags {
                no_color,
                quiet,
                json,
            },
            YamlConfigStore::new(config),
        );
        match command {
            Command::Command => commands::command::run(&app),
            Command::Args(args) => commands::args::run(&app, &args),
            Command::Sandbox(args) => commands::sandbox::run(&app, &args),
            Command::Config => commands::config::run(&app),
            Command::Converge(args) => commands::converge::run(&app, &args).await,
            Command::Version => commands::version::run(&app),
        }
    }
}
