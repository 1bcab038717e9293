//! Compartment listing command.

use crate::cli::common::{describe, print_json, CliError, CliResult};
use crate::services::compartments::{enumerate_columns, ColumnLayout};
use crate::services::ProjectService;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// List the compartments of a project's current geometry
#[derive(Debug, Clone, Args)]
pub struct CompartmentsArgs {
    /// Path to project JSON file
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct CompartmentsResponse {
    project: String,
    columns: Vec<ColumnOutput>,
}

#[derive(Serialize, Debug)]
struct ColumnOutput {
    column: String,
    width_cm: f64,
    height_cm: f64,
    module_split: bool,
    compartments: Vec<CompartmentOutput>,
}

#[derive(Serialize, Debug)]
struct CompartmentOutput {
    id: String,
    module: String,
    height_cm: f64,
    clear_height_cm: f64,
}

impl From<&ColumnLayout> for ColumnOutput {
    fn from(column: &ColumnLayout) -> Self {
        Self {
            column: column.column.to_string(),
            width_cm: column.block.width * 100.0,
            height_cm: column.height * 100.0,
            module_split: column.has_module_split(),
            compartments: column
                .compartments
                .iter()
                .map(|c| CompartmentOutput {
                    id: c.id.to_string(),
                    module: c.module.to_string(),
                    height_cm: c.height_cm(),
                    clear_height_cm: c.clear_height_m() * 100.0,
                })
                .collect(),
        }
    }
}

impl CompartmentsArgs {
    /// Execute the compartments command
    pub fn execute(&self) -> CliResult<()> {
        let project = ProjectService::load(&self.project)
            .map_err(|e| CliError::io(describe(&e)))?;

        let columns = enumerate_columns(&project.wardrobe.structure);
        let response = CompartmentsResponse {
            project: project.name.clone(),
            columns: columns.iter().map(ColumnOutput::from).collect(),
        };

        if self.json {
            return print_json(&response);
        }

        println!("Project: {}", response.project);
        for column in &response.columns {
            let split = if column.module_split {
                ", split into modules"
            } else {
                ""
            };
            println!(
                "\nColumn {} ({:.1} × {:.1} cm{split})",
                column.column, column.width_cm, column.height_cm
            );
            for compartment in &column.compartments {
                println!(
                    "  {:<6} {:>7.1} cm  (clear {:.1} cm, {})",
                    compartment.id,
                    compartment.height_cm,
                    compartment.clear_height_cm,
                    compartment.module
                );
            }
        }

        Ok(())
    }
}
