//! The per-version descriptor document (`data.json`).
//!
//! # Storage layout
//!
//! ```text
//! <data-root>/
//!   <congress>/bills/<type>/<number>/
//!     text-versions/
//!       <version-code>/
//!         data.json          (one descriptor per text version)
//! ```
//!
//! Loading is lenient: unknown fields are ignored and legacy documents that
//! spell the issue date `issued` or `date` instead of `issued_on` are still
//! readable via [`Descriptor::issued_date`]. Saving writes `.tmp` + rename,
//! the same atomic pattern the publisher uses for whole trees.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{io_err, DescriptorError};

/// Filename of a version descriptor inside its version directory.
pub const FILE_NAME: &str = "data.json";

/// One version's metadata record.
///
/// Every field is optional; serialization omits what is absent so synthesized
/// descriptors stay minimal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<String>,

    /// Legacy spellings of the issue date, read-only in practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_version_id: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub urls: BTreeMap<String, String>,

    /// Set when the bill identity was synthesized from the path rather than
    /// read from source metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_id_source: Option<String>,
}

impl Descriptor {
    /// The issue date string, honouring the `issued_on` → `issued` → `date`
    /// field priority. Blank strings are skipped.
    pub fn issued_date(&self) -> Option<&str> {
        [
            self.issued_on.as_deref(),
            self.issued.as_deref(),
            self.date.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
    }
}

/// Load the descriptor at `path`.
///
/// Returns `DescriptorError::Parse` (with path context) on malformed JSON;
/// the caller decides whether that degrades to an mtime-based date.
pub fn load(path: &Path) -> Result<Descriptor, DescriptorError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&contents).map_err(|e| DescriptorError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save `descriptor` to `path` atomically (`.tmp` + rename).
pub fn save(path: &Path, descriptor: &Descriptor) -> Result<(), DescriptorError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    let json = serde_json::to_string_pretty(descriptor)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}
