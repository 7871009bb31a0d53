//! Shared pipeline entrypoint used by the CLI.

use std::path::Path;

use serde::Serialize;

use crate::discover::discover;
use crate::error::PublishError;
use crate::publish::publish_winners;
use crate::select::select_winners;

/// Per-stage counts for one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Version directories seen in the raw tree.
    pub discovered: usize,
    /// Version directories that classified into a bill identity.
    pub classified: usize,
    /// Descriptors synthesized from source documents or mtimes.
    pub synthesized: usize,
    /// Version directories skipped (unrecognized layout, failed synthesis).
    pub skipped: usize,
    /// Distinct bills with a selected winner.
    pub bills: usize,
    /// Winners staged and swapped into the published tree.
    pub published: usize,
    pub dry_run: bool,
}

/// Run the full selection-and-publish pipeline.
///
/// Deterministic given fixed input content and file timestamps. Fails with
/// [`PublishError::NothingToPublish`] when the tree yields zero bills, and
/// with an I/O error on staging failure; in both cases the published tree is
/// untouched.
pub fn run(data_root: &Path, out_root: &Path, dry_run: bool) -> Result<RunSummary, PublishError> {
    let discovery = discover(data_root, dry_run)?;
    let classified = discovery.candidates.len();
    tracing::info!(
        "discovered {} version directories under {} ({} classified, {} skipped)",
        discovery.discovered,
        data_root.display(),
        classified,
        discovery.skipped
    );

    let winners = select_winners(discovery.candidates);
    let report = publish_winners(&winners, out_root, dry_run)?;

    Ok(RunSummary {
        discovered: discovery.discovered,
        classified,
        synthesized: discovery.synthesized,
        skipped: discovery.skipped,
        bills: winners.len(),
        published: report.published,
        dry_run,
    })
}
