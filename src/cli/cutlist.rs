//! Cut-list command.

use crate::cli::common::{describe, print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::{CutList, MaterialCategory, Panel};
use crate::services::{generate_cut_list, reconcile, ProjectService};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Generate the priced cut list for a project
#[derive(Debug, Clone, Args)]
pub struct CutlistArgs {
    /// Path to project JSON file
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Material catalog JSON file (overrides inline and configured catalogs)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Handle catalog JSON file
    #[arg(long, value_name = "FILE")]
    pub handles: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Group panels by element instead of listing them in cutting order
    #[arg(long)]
    pub by_element: bool,
}

impl CutlistArgs {
    /// Execute the cutlist command
    pub fn execute(&self) -> CliResult<()> {
        let project = ProjectService::load(&self.project)
            .map_err(|e| CliError::io(describe(&e)))?;

        let config = Config::load().map_err(|e| {
            CliError::validation(format!("Failed to load configuration: {}", describe(&e)))
        })?;

        let catalog = ProjectService::resolve_catalog(
            &project,
            &config,
            self.catalog.as_deref(),
            self.handles.as_deref(),
        )
        .map_err(|e| CliError::io(describe(&e)))?;

        // Price only what the current geometry can hold
        let reconciled = reconcile(&project.wardrobe.structure, &project.configuration);
        if !reconciled.report.is_clean() {
            info!(
                "Ignoring {} stale configuration entries; run `reconcile --write` to persist",
                reconciled.report.change_count()
            );
        }

        let cut_list = generate_cut_list(&project.wardrobe, &reconciled.config, &catalog);

        if self.json {
            print_json(&cut_list)?;
        } else if !cut_list.is_empty() {
            print_report(&cut_list, &config, self.by_element);
        }

        if cut_list.is_empty() {
            return Err(CliError::validation(format!(
                "Cannot price project '{}': check dimensions and that material '{}' is in the catalog",
                project.name, project.wardrobe.material_id
            )));
        }

        Ok(())
    }
}

fn print_panel(panel: &Panel) {
    println!(
        "  {:<5} {:<44} {:>7.1} × {:>7.1} cm  {:>4.0} mm  {:>6.3} m²  {:>9.2}",
        panel.code,
        panel.description,
        panel.width_cm,
        panel.height_cm,
        panel.thickness_mm,
        panel.area_m2,
        panel.cost
    );
}

fn print_report(cut_list: &CutList, config: &Config, by_element: bool) {
    let currency = &config.report.currency;

    if by_element {
        for group in &cut_list.grouped_by_element {
            println!("{}", group.element);
            for panel in &group.items {
                print_panel(panel);
            }
            println!();
        }
    } else {
        println!("Panels:");
        for panel in &cut_list.items {
            print_panel(panel);
        }
        println!();
    }

    if config.report.show_hardware && !cut_list.hardware.is_empty() {
        println!("Hardware:");
        for item in &cut_list.hardware {
            println!(
                "  {:<5} {:<44} {:>3} × {:>7.2} = {:>9.2} {currency}",
                item.code, item.description, item.quantity, item.unit_price, item.total
            );
        }
        println!();
    }

    println!("Breakdown:");
    for category in MaterialCategory::ALL {
        let total = cut_list.price_breakdown.get(category);
        println!(
            "  {:<8} {:>8.3} m²  {:>9.0} {currency}",
            category.to_string(),
            total.area,
            total.price
        );
    }
    println!();
    println!("Total area: {:.3} m²", cut_list.total_area);
    println!("Total cost: {:.2} {currency}", cut_list.total_cost);
}
