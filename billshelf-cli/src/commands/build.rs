//! `billshelf build` — run the selection pipeline and publish winners.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use billshelf_publish::{pipeline, PublishError, RunSummary};

/// Exit status for a run that picked zero bills, distinguishable from both
/// success and unexpected failure so automation can tell "nothing to
/// publish" apart from "published successfully".
pub const EXIT_NOTHING_TO_PUBLISH: u8 = 2;

/// Arguments for `billshelf build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Root of the raw data tree.
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,

    /// Published output tree, replaced atomically on success.
    #[arg(long, default_value = "latest_data")]
    pub out_root: PathBuf,

    /// Report what would be selected without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl BuildArgs {
    pub fn run(self) -> Result<ExitCode> {
        match pipeline::run(&self.data_root, &self.out_root, self.dry_run) {
            Ok(summary) => {
                if self.json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&summary)
                            .context("failed to serialize build summary")?
                    );
                } else {
                    print_summary(&self.out_root, &summary);
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(PublishError::NothingToPublish) => {
                eprintln!(
                    "{} no bills picked under '{}' — published tree untouched",
                    "✗".red().bold(),
                    self.data_root.display()
                );
                Ok(ExitCode::from(EXIT_NOTHING_TO_PUBLISH))
            }
            Err(err) => Err(err).with_context(|| {
                format!("build failed for data root '{}'", self.data_root.display())
            }),
        }
    }
}

fn print_summary(out_root: &std::path::Path, summary: &RunSummary) {
    let prefix = if summary.dry_run { "[dry-run] " } else { "" };
    println!(
        "{prefix}{} {} bill(s) -> {}",
        "✓".green().bold(),
        summary.published,
        out_root.display()
    );
    println!(
        "  {} version dir(s) discovered, {} classified, {} synthesized, {} skipped",
        summary.discovered, summary.classified, summary.synthesized, summary.skipped
    );
}
