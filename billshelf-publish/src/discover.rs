//! Candidate discovery over the raw data tree.
//!
//! Walks for version directories (children of a `text-versions` directory),
//! classifies each into a bill identity, synthesizes a descriptor where one
//! is missing, and extracts per-candidate metadata. Unrecognized layouts and
//! failed syntheses are counted and skipped — discovery never aborts the run
//! for a single bad directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use billshelf_classify::{classify_path, TEXT_VERSIONS};
use billshelf_core::{descriptor, CandidateRecord};
use billshelf_descriptor::{extract_candidate, synthesize, synthesize_into, unwritten_candidate};

use crate::error::PublishError;

/// What a discovery pass found.
#[derive(Debug, Default)]
pub struct Discovery {
    pub candidates: Vec<CandidateRecord>,
    /// Version directories seen.
    pub discovered: usize,
    /// Descriptors synthesized (or, in a dry run, that would have been).
    pub synthesized: usize,
    /// Version directories skipped: unrecognized layout or failed synthesis.
    pub skipped: usize,
}

/// Walk `data_root` and produce every usable candidate record.
///
/// In a dry run, missing descriptors are synthesized in memory only; the
/// raw tree is not written to.
pub fn discover(data_root: &Path, dry_run: bool) -> Result<Discovery, PublishError> {
    let mut discovery = Discovery::default();
    if !data_root.is_dir() {
        tracing::debug!("data root missing or not a directory: {}", data_root.display());
        return Ok(discovery);
    }

    for version_dir in version_dirs(data_root) {
        discovery.discovered += 1;

        let classified = match classify_path(&version_dir) {
            Ok(classified) => classified,
            Err(err) => {
                tracing::debug!("skipping: {err}");
                discovery.skipped += 1;
                continue;
            }
        };

        let descriptor_path = version_dir.join(descriptor::FILE_NAME);
        let candidate = if descriptor_path.is_file() {
            extract_candidate(&descriptor_path, classified.key, classified.version_code)
        } else if dry_run {
            match synthesize(&version_dir, Some(&classified.key)) {
                Ok(synthesized) => {
                    discovery.synthesized += 1;
                    unwritten_candidate(
                        &version_dir,
                        &synthesized,
                        classified.key,
                        classified.version_code,
                    )
                }
                Err(err) => {
                    tracing::warn!("synthesis failed for {}: {err}", version_dir.display());
                    discovery.skipped += 1;
                    continue;
                }
            }
        } else {
            match synthesize_into(&version_dir, Some(&classified.key)) {
                Ok(_) => {
                    discovery.synthesized += 1;
                    extract_candidate(&descriptor_path, classified.key, classified.version_code)
                }
                Err(err) => {
                    tracing::warn!("synthesis failed for {}: {err}", version_dir.display());
                    discovery.skipped += 1;
                    continue;
                }
            }
        };

        discovery.candidates.push(candidate);
    }

    Ok(discovery)
}

/// Version directories in deterministic order: every directory whose parent
/// is named `text-versions`.
fn version_dirs(data_root: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = WalkDir::new(data_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| {
            entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .map(|name| name == TEXT_VERSIONS)
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();
    dirs.sort();
    dirs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
