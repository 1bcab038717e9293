//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving user configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME};

/// Default catalog files used when a project carries no inline catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Material catalog JSON file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_catalog: Option<PathBuf>,
    /// Handle catalog JSON file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_catalog: Option<PathBuf>,
}

/// Report output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Label printed next to prices
    #[serde(default = "default_currency")]
    pub currency: String,
    /// List handles in the text report
    #[serde(default = "default_show_hardware")]
    pub show_hardware: bool,
}

fn default_currency() -> String {
    "EUR".to_string()
}

const fn default_show_hardware() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            show_hardware: default_show_hardware(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/WardrobeCutlist/config.toml`
/// - macOS: `~/Library/Application Support/WardrobeCutlist/config.toml`
/// - Windows: `%APPDATA%\WardrobeCutlist\config.toml`
///
/// Setting `WARDROBE_CUTLIST_CONFIG_DIR` replaces the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Catalog file locations
    #[serde(default)]
    pub paths: PathConfig,
    /// Report preferences
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no config directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// validated.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML or invalid values.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or any file operation fails.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).with_context(|| {
            format!("Failed to rename temp config file to: {}", config_path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `currency` is a non-empty label
    ///
    /// Catalog paths are checked when they are read, so a config naming a
    /// catalog on an unmounted drive still loads.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.report.currency.trim().is_empty() {
            anyhow::bail!("Currency label must not be empty");
        }

        Ok(())
    }
}
