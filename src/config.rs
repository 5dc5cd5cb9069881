//! Configuration management for excerptor

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::excerpt::DEFAULT_MAX_FAN_OUT;
use crate::quota::QuotaPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub excerpt: ExcerptConfig,
    #[serde(default)]
    pub quota: QuotaPolicy,
}

/// Excerpt generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExcerptConfig {
    /// Maximum number of pages a single sentence may span
    #[serde(default = "default_max_fan_out")]
    pub max_fan_out: u64,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            max_fan_out: default_max_fan_out(),
        }
    }
}

fn default_max_fan_out() -> u64 {
    DEFAULT_MAX_FAN_OUT
}

impl Config {
    /// Get the config file path (~/.config/excerptor/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("excerptor").join("config.toml"))
    }

    /// Load configuration from file, or return defaults if the file does not exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML; missing sections fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
