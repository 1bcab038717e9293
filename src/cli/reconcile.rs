//! Reconcile command: prunes stale configuration from a project file.

use crate::cli::common::{describe, print_json, CliError, CliResult};
use crate::services::reconcile::{reconcile, ReconcileReport};
use crate::services::ProjectService;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Drop or clamp configuration that no longer fits the project's geometry
#[derive(Debug, Clone, Args)]
pub struct ReconcileArgs {
    /// Path to project JSON file
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Save the reconciled configuration back to the project file
    #[arg(long, conflicts_with = "check")]
    pub write: bool,

    /// Exit with code 3 if reconciliation would change the project
    #[arg(long)]
    pub check: bool,
}

#[derive(Serialize, Debug)]
struct ReconcileResponse<'a> {
    clean: bool,
    changes: usize,
    written: bool,
    report: &'a ReconcileReport,
}

impl ReconcileArgs {
    /// Execute the reconcile command
    pub fn execute(&self) -> CliResult<()> {
        let mut project = ProjectService::load(&self.project)
            .map_err(|e| CliError::io(describe(&e)))?;

        let result = reconcile(&project.wardrobe.structure, &project.configuration);
        let clean = result.report.is_clean();

        let written = self.write && !clean;
        if written {
            project.configuration = result.config;
            ProjectService::save(&project, &self.project)
                .map_err(|e| CliError::io(describe(&e)))?;
            info!("Saved reconciled project to {}", self.project.display());
        }

        let response = ReconcileResponse {
            clean,
            changes: result.report.change_count(),
            written,
            report: &result.report,
        };

        if self.json {
            print_json(&response)?;
        } else {
            print_report(&response);
        }

        if self.check && !clean {
            return Err(CliError::changes_pending(format!(
                "{} configuration entries are stale",
                response.changes
            )));
        }

        Ok(())
    }
}

fn print_report(response: &ReconcileResponse<'_>) {
    if response.clean {
        println!("✓ Configuration matches the current geometry");
        return;
    }

    let report = response.report;
    println!("✗ {} stale configuration entries", response.changes);

    for id in &report.dropped_element_configs {
        println!("  - element config {id}: compartment no longer exists");
    }
    for id in &report.dropped_extras {
        println!("  - extras {id}: compartment no longer exists");
    }
    for group in &report.dropped_door_groups {
        println!("  - door group {group}: references a missing compartment");
    }
    for key in &report.dropped_door_selections {
        println!("  - door selection {key}: compartment no longer exists");
    }
    for clamp in &report.clamped_drawers {
        let cleared = if clamp.cleared_external {
            ", external flags cleared"
        } else {
            ""
        };
        println!(
            "  - drawers {}: {:?} → {:?}{cleared}",
            clamp.compartment, clamp.before, clamp.after
        );
    }

    if response.written {
        println!("\nProject updated.");
    }
}
