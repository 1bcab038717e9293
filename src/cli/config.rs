//! Configuration management CLI commands.

use crate::cli::common::{describe, print_json, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default material catalog file
    #[arg(long, value_name = "FILE")]
    material_catalog: Option<PathBuf>,

    /// Default handle catalog file
    #[arg(long, value_name = "FILE")]
    handle_catalog: Option<PathBuf>,

    /// Currency label for reports
    #[arg(long, value_name = "CODE")]
    currency: Option<String>,

    /// Whether the text report lists handles
    #[arg(long, value_name = "BOOL")]
    show_hardware: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    config_file: Option<String>,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().map_err(|e| {
            CliError::validation(format!("Failed to load configuration: {}", describe(&e)))
        })?;

        if self.json {
            let output = ConfigOutput {
                config_file: Config::config_file_path()
                    .ok()
                    .map(|p| p.to_string_lossy().to_string()),
                config: &config,
            };
            print_json(&output)
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.material_catalog.is_none()
            && self.handle_catalog.is_none()
            && self.currency.is_none()
            && self.show_hardware.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --material-catalog, \
                 --handle-catalog, --currency, or --show-hardware",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        for path in [&self.material_catalog, &self.handle_catalog].into_iter().flatten() {
            if !path.is_file() {
                return Err(CliError::validation(format!(
                    "Catalog file does not exist: {}",
                    path.display()
                )));
            }
        }

        if let Some(path) = &self.material_catalog {
            config.paths.material_catalog = Some(path.clone());
        }
        if let Some(path) = &self.handle_catalog {
            config.paths.handle_catalog = Some(path.clone());
        }
        if let Some(currency) = &self.currency {
            config.report.currency = currency.trim().to_string();
        }
        if let Some(show) = self.show_hardware {
            config.report.show_hardware = show;
        }

        config.validate().map_err(|e| CliError::validation(describe(&e)))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {}", describe(&e))))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let show_path = |path: &Option<PathBuf>| {
        path.as_ref()
            .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string())
    };

    println!("Configuration:");
    println!();
    println!("Paths:");
    println!("  Material catalog: {}", show_path(&config.paths.material_catalog));
    println!("  Handle catalog:   {}", show_path(&config.paths.handle_catalog));
    println!();
    println!("Report:");
    println!("  Currency:         {}", config.report.currency);
    println!("  Show hardware:    {}", config.report.show_hardware);

    if let Ok(path) = Config::config_file_path() {
        println!();
        println!("Config file: {}", path.display());
    }
}
