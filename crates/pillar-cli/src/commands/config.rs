//! Config command implementation.
//!
//! Shows, locates and initializes the settings file.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::settings::Settings;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file location
    Path,

    /// Write a configuration file with default values
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => path(ctx),
        ConfigCommand::Init(init_args) => init(&init_args, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    match ctx.printer.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ctx.settings)?),
        _ => print!("{}", ctx.settings.to_toml()?),
    }
    Ok(())
}

fn path(ctx: &Context) -> Result<()> {
    let path = Settings::resolve_path(ctx.config_path.as_deref())?;
    println!("{}", path.display());
    if !path.exists() {
        tracing::info!("settings file does not exist yet");
    }
    Ok(())
}

fn init(args: &InitArgs, ctx: &Context) -> Result<()> {
    let path = Settings::resolve_path(ctx.config_path.as_deref())?;
    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path).into());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Settings::default().to_toml()?)?;
    tracing::info!(path = %path.display(), "wrote default settings");

    ctx.printer
        .success(&format!("Configuration written to {}", path.display()));
    Ok(())
}
