//! resdeploy — push local web-resource files to a Dataverse environment.
//!
//! # Usage
//!
//! ```text
//! resdeploy deploy [--settings <path>] [--dry-run]
//! resdeploy check [--settings <path>] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, deploy::DeployArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "resdeploy",
    version,
    about = "Deploy local HTML/CSS/JS files as Dataverse web resources",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile local files with remote web resources and publish.
    Deploy(DeployArgs),

    /// Validate settings and show how each mapping entry resolves.
    Check(CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Deploy(args) => args.run(),
        Commands::Check(args) => args.run(),
    }
}
