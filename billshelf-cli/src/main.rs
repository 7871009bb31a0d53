//! Billshelf — latest-bill-text curation CLI.
//!
//! # Usage
//!
//! ```text
//! billshelf build [--data-root data] [--out-root latest_data] [--dry-run] [--json]
//! billshelf manifest [--data-root data] [--latest-root latest_data] [--out-dir .]
//!                    [--bucket B] [--prefix P]
//! billshelf status [--out-root latest_data] [--json]
//! ```
//!
//! # Exit codes
//!
//! - `0` — published (or dry run) successfully
//! - `1` — any unexpected failure; the published tree is untouched
//! - `2` — zero bills picked; nothing was published

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::{build::BuildArgs, manifest::ManifestArgs, status::StatusArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "billshelf",
    version,
    about = "Select and publish the latest text version of every bill",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Select one winner per bill and publish them atomically.
    Build(BuildArgs),

    /// Build local and GCS manifest documents from the trees.
    Manifest(ManifestArgs),

    /// Summarize the published tree.
    Status(StatusArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Build(args) => args.run(),
        Commands::Manifest(args) => args.run(),
        Commands::Status(args) => args.run(),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
