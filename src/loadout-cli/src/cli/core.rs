//! Core CLI definitions

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use loadout::{ConvertOptions, RuleSet};
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "loadout")]
#[command(about = "Convert loadout JSON exports into equipment-type XML", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log conversion details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a loadout JSON file (or a directory of them) to XML
    #[command(visible_alias = "c")]
    Convert {
        /// Path to a .json file, a directory, or "-" for stdin
        input: PathBuf,

        /// Output file (or directory when converting a directory).
        /// Single files are written to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Show the computed equip order and sort keys for a loadout
    #[command(visible_alias = "e")]
    Explain {
        /// Path to a .json file or "-" for stdin
        input: PathBuf,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Configure default conversion settings
    Configure {
        /// Set default priority rule set (standard, hands-first)
        #[arg(long)]
        rules: Option<RuleSet>,

        /// Set default maximum item nesting depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

/// Conversion settings that override the config file
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// Priority rule set (standard, hands-first); uses configured default if not provided
    #[arg(long, env = "LOADOUT_RULES")]
    pub rules: Option<RuleSet>,

    /// Maximum item nesting depth; uses configured default if not provided
    #[arg(long, env = "LOADOUT_MAX_DEPTH")]
    pub max_depth: Option<usize>,
}

impl OptionArgs {
    /// Merge with the config file and built-in defaults
    pub fn resolve(&self) -> Result<ConvertOptions> {
        let config = Config::load()?;
        config.options(self.rules, self.max_depth)
    }
}
