mod cli;
mod commands;
mod config;
mod file_utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "loadout=debug,loadout_cli=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            options,
        } => {
            let options = options.resolve()?;
            commands::convert::handle(&input, output.as_deref(), &options)?;
        }

        Commands::Explain { input, options } => {
            let options = options.resolve()?;
            commands::explain::handle(&input, &options)?;
        }

        Commands::Configure {
            rules,
            max_depth,
            show,
        } => {
            commands::configure::handle(rules, max_depth, show)?;
        }
    }

    Ok(())
}
