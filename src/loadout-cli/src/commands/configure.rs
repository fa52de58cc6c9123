//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up loadout CLI defaults.

use crate::config::{check_max_depth, Config};
use anyhow::Result;
use loadout::{ConvertOptions, RuleSet, MAX_SUPPORTED_DEPTH};

/// Handle the configure command
///
/// # Arguments
/// * `rules` - Optional rule set to store as default
/// * `max_depth` - Optional nesting limit to store as default
/// * `show` - If true, show current configuration
pub fn handle(rules: Option<RuleSet>, max_depth: Option<usize>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if rules.is_none() && max_depth.is_none() {
        show_usage();
        return Ok(());
    }

    if let Some(rules) = rules {
        config.rules = Some(rules);
        println!("Rule set configured: {}", rules);
    }
    if let Some(depth) = max_depth {
        check_max_depth(depth)?;
        config.max_depth = Some(depth);
        println!("Maximum depth configured: {}", depth);
    }

    config.save()?;
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    let defaults = ConvertOptions::default();

    match config.rules {
        Some(rules) => println!("Rule set: {}", rules),
        None => println!("Rule set: {} (default)", defaults.rules),
    }
    match config.max_depth {
        Some(depth) if depth > MAX_SUPPORTED_DEPTH => println!(
            "Maximum depth: {} (above supported limit of {})",
            depth, MAX_SUPPORTED_DEPTH
        ),
        Some(depth) => println!("Maximum depth: {}", depth),
        None => println!("Maximum depth: {} (default)", defaults.max_depth),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: loadout configure --rules <standard|hands-first> --max-depth <N>");
    println!("       loadout configure --show");
}
