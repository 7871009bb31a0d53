//! Atomic tree publisher.
//!
//! ## Swap protocol
//!
//! 1. Refuse outright when there are zero winners.
//! 2. Stage every winner into a fresh `<out>.staging` tree.
//! 3. Move any existing published tree aside to `<out>.bak` (replacing a
//!    stale backup first).
//! 4. Rename the staging tree into the published location — the single
//!    commit point.
//! 5. Delete the backup only after the rename succeeds; restore it if the
//!    rename fails.
//!
//! A staging failure removes the staging tree and leaves the published tree
//! untouched. At every observable instant the published location holds
//! either the complete previous tree or the complete new one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use billshelf_classify::BILLS;
use billshelf_core::{descriptor, BillKey, CandidateRecord};

use crate::error::{io_err, PublishError};

/// Outcome of a publish.
#[derive(Debug)]
pub struct PublishReport {
    /// Bills staged and swapped into the published tree.
    pub published: usize,
}

/// Stage `winners` and swap them into `out_root`.
///
/// In a dry run nothing is written; the report carries the would-be count.
pub fn publish_winners(
    winners: &BTreeMap<BillKey, CandidateRecord>,
    out_root: &Path,
    dry_run: bool,
) -> Result<PublishReport, PublishError> {
    if winners.is_empty() {
        return Err(PublishError::NothingToPublish);
    }

    if dry_run {
        for (key, winner) in winners {
            tracing::info!(
                "[dry-run] would publish {} from {}",
                key,
                winner.path.display()
            );
        }
        return Ok(PublishReport {
            published: winners.len(),
        });
    }

    let staging = sibling(out_root, ".staging")?;
    let backup = sibling(out_root, ".bak")?;

    if staging.exists() {
        std::fs::remove_dir_all(&staging).map_err(|e| io_err(&staging, e))?;
    }
    std::fs::create_dir_all(&staging).map_err(|e| io_err(&staging, e))?;

    if let Err(err) = stage(winners, &staging) {
        let _ = std::fs::remove_dir_all(&staging);
        return Err(err);
    }

    if let Err(err) = swap(&staging, out_root, &backup) {
        let _ = std::fs::remove_dir_all(&staging);
        return Err(err);
    }

    Ok(PublishReport {
        published: winners.len(),
    })
}

/// Copy each winner's descriptor into the staging tree, replicating the
/// `<congress>/bills/<type>/<number>/` shape.
fn stage(
    winners: &BTreeMap<BillKey, CandidateRecord>,
    staging: &Path,
) -> Result<(), PublishError> {
    for (key, winner) in winners {
        let dest_dir = staging
            .join(&key.congress)
            .join(BILLS)
            .join(&key.bill_type)
            .join(&key.number);
        std::fs::create_dir_all(&dest_dir).map_err(|e| io_err(&dest_dir, e))?;
        let dest = dest_dir.join(descriptor::FILE_NAME);
        std::fs::copy(&winner.path, &dest).map_err(|e| io_err(&winner.path, e))?;
        tracing::info!("picked {} -> {}", winner.path.display(), dest.display());
    }
    Ok(())
}

/// The commit point: backup-aside, rename, then drop the backup.
fn swap(staging: &Path, out_root: &Path, backup: &Path) -> Result<(), PublishError> {
    if backup.exists() {
        std::fs::remove_dir_all(backup).map_err(|e| io_err(backup, e))?;
    }
    if let Some(parent) = out_root.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    let had_previous = out_root.exists();
    if had_previous {
        std::fs::rename(out_root, backup).map_err(|e| io_err(out_root, e))?;
    }

    if let Err(err) = std::fs::rename(staging, out_root) {
        // The previous tree goes back to the published location.
        if had_previous {
            let _ = std::fs::rename(backup, out_root);
        }
        return Err(io_err(out_root, err));
    }

    if had_previous {
        if let Err(err) = std::fs::remove_dir_all(backup) {
            tracing::warn!(
                "publish committed but backup removal failed: {}: {err}",
                backup.display()
            );
        }
    }
    Ok(())
}

/// `<out_root>` with `suffix` appended to its final component.
fn sibling(out_root: &Path, suffix: &str) -> Result<PathBuf, PublishError> {
    let Some(name) = out_root.file_name() else {
        return Err(io_err(
            out_root,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "output root has no directory name",
            ),
        ));
    };
    let mut staged = name.to_os_string();
    staged.push(suffix);
    Ok(out_root.with_file_name(staged))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
