//! Configuration management for loadout CLI

use anyhow::{ensure, Context, Result};
use loadout::{ConvertOptions, RuleSet, MAX_SUPPORTED_DEPTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub rules: Option<RuleSet>,
    pub max_depth: Option<usize>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("loadout");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Conversion options: explicit values first, then config, then defaults
    pub fn options(
        &self,
        rules: Option<RuleSet>,
        max_depth: Option<usize>,
    ) -> Result<ConvertOptions> {
        let defaults = ConvertOptions::default();
        let max_depth = max_depth.or(self.max_depth).unwrap_or(defaults.max_depth);
        check_max_depth(max_depth)?;

        Ok(ConvertOptions {
            rules: rules.or(self.rules).unwrap_or(defaults.rules),
            max_depth,
        })
    }
}

/// Reject nesting limits the decoder cannot enforce
pub fn check_max_depth(max_depth: usize) -> Result<()> {
    ensure!(
        max_depth <= MAX_SUPPORTED_DEPTH,
        "Maximum depth {} is above the supported limit of {}",
        max_depth,
        MAX_SUPPORTED_DEPTH
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            rules: Some(RuleSet::HandsFirst),
            max_depth: Some(8),
        };
        config.save_to(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("rules = \"hands-first\""));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "rules = \"sideways\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_options_precedence() {
        let config = Config {
            rules: Some(RuleSet::HandsFirst),
            max_depth: None,
        };

        let options = config.options(None, None).unwrap();
        assert_eq!(options.rules, RuleSet::HandsFirst);
        assert_eq!(options.max_depth, loadout::DEFAULT_MAX_DEPTH);

        let options = config.options(Some(RuleSet::Standard), Some(4)).unwrap();
        assert_eq!(options.rules, RuleSet::Standard);
        assert_eq!(options.max_depth, 4);
    }

    #[test]
    fn test_unreachable_depth_rejected() {
        let config = Config {
            rules: None,
            max_depth: Some(100),
        };
        let err = config.options(None, None).unwrap_err();
        assert!(err.to_string().contains("supported limit of 60"));

        let options = config.options(None, Some(MAX_SUPPORTED_DEPTH)).unwrap();
        assert_eq!(options.max_depth, MAX_SUPPORTED_DEPTH);
    }
}
