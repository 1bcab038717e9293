//! Wardrobe Cutlist - command-line front end for the cut-list engine.
//!
//! ```bash
//! wardrobe-cutlist compartments --project hallway.json
//! wardrobe-cutlist cutlist --project hallway.json --catalog boards.json
//! wardrobe-cutlist reconcile --project hallway.json --write
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wardrobe_cutlist::cli::{
    CliResult, CompartmentsArgs, ConfigArgs, CutlistArgs, ExitCode, ReconcileArgs,
};
use wardrobe_cutlist::constants::APP_BINARY_NAME;

/// Wardrobe Cutlist - structural decomposition and cut lists for wardrobes
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the compartments of a project
    Compartments(CompartmentsArgs),
    /// Generate the priced cut list for a project
    Cutlist(CutlistArgs),
    /// Prune configuration that no longer fits the geometry
    Reconcile(ReconcileArgs),
    /// Show or change user configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Compartments(args) => args.execute(),
            Self::Cutlist(args) => args.execute(),
            Self::Reconcile(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code.code());
    }

    std::process::exit(ExitCode::Success.code());
}
