//! CLI command handlers.
//!
//! Each subcommand loads a project or the user config, runs one engine
//! stage, and prints either a readable report or JSON for scripting.

pub mod common;
pub mod compartments;
pub mod config;
pub mod cutlist;
pub mod reconcile;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use compartments::CompartmentsArgs;
pub use config::ConfigArgs;
pub use cutlist::CutlistArgs;
pub use reconcile::ReconcileArgs;
