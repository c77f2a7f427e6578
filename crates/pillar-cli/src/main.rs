//! Pillar CLI - bootstrap and evaluate piecewise-flat forward curves.
//!
//! # Usage
//!
//! ```bash
//! # Bootstrap a curve from quotes and save it
//! pillar bootstrap --quotes quotes.csv --save curve.json
//!
//! # Inspect a curve
//! pillar curve show --file curve.json
//! pillar curve eval --times 1,2,5 --forwards 0.03,0.035,0.04 --at 0.5,3,10
//!
//! # Value a bond on a curve
//! pillar value --curve curve.json --maturity 3 --coupon 0.045
//!
//! # Create a settings file
//! pillar config init
//! ```
//!
//! Logs go to stderr. `-v` enables info, `-vv` debug; `RUST_LOG` overrides
//! both.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod input;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::config::ConfigCommand;
use commands::{ConfigArgs, Context};
use output::Printer;
use settings::Settings;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // `config init` and `config path` must work before a settings file exists
    let settings = match &cli.command {
        Commands::Config(ConfigArgs {
            command: ConfigCommand::Init(_) | ConfigCommand::Path,
        }) => Settings::default(),
        _ => Settings::load(cli.config.as_deref())?,
    };

    let ctx = Context {
        printer: Printer {
            format: cli.format.unwrap_or(settings.output.format),
            precision: settings.output.precision,
            quiet: cli.quiet,
        },
        settings,
        config_path: cli.config,
    };

    match cli.command {
        Commands::Curve(args) => commands::curve::execute(args, &ctx)?,
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, &ctx)?,
        Commands::Value(args) => commands::value::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose > 1)
                .with_writer(std::io::stderr),
        )
        .init();
}
