//! Descriptor synthesis for version directories that lack one.

use std::path::Path;

use billshelf_core::dates::{date_only, mtime_utc};
use billshelf_core::descriptor::{self, Descriptor};
use billshelf_core::BillKey;

use crate::error::SynthError;
use crate::source;

/// Build a descriptor for `version_dir` from whatever MODS source is
/// discoverable.
///
/// Field rules:
/// - `issued_on` — the source document's date when one was extracted, else
///   the version directory's mtime at calendar-date precision;
/// - `version_code` — the directory name;
/// - `bill_version_id` / `urls` — from the source document when present;
/// - `bill_id` + `bill_id_source: "path"` — when the caller supplies the
///   path-derived identity.
///
/// A directory with no source document at all still synthesizes the minimal
/// mtime-dated descriptor, so every candidate carries a publishable
/// `data.json`.
pub fn synthesize(version_dir: &Path, key: Option<&BillKey>) -> Result<Descriptor, SynthError> {
    let found = source::find_and_parse(version_dir)?;

    let mut synthesized = Descriptor {
        version_code: version_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        ..Descriptor::default()
    };

    if let Some(found) = found {
        tracing::debug!(
            "synthesizing {} from {}",
            version_dir.display(),
            found.origin.display()
        );
        synthesized.issued_on = found.record.issued;
        synthesized.bill_version_id = found.record.version_id;
        synthesized.urls = found.record.urls;
    }

    if synthesized.issued_on.is_none() {
        synthesized.issued_on = Some(date_only(mtime_utc(version_dir)));
    }

    if let Some(key) = key {
        synthesized.bill_id = Some(key.bill_id());
        synthesized.bill_id_source = Some("path".to_string());
    }

    Ok(synthesized)
}

/// Synthesize and write the descriptor into `version_dir`.
pub fn synthesize_into(
    version_dir: &Path,
    key: Option<&BillKey>,
) -> Result<Descriptor, SynthError> {
    let synthesized = synthesize(version_dir, key)?;
    let path = version_dir.join(descriptor::FILE_NAME);
    descriptor::save(&path, &synthesized)?;
    tracing::info!("synthesized descriptor: {}", path.display());
    Ok(synthesized)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
