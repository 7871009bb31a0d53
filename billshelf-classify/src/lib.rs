//! Bill-identity classification for candidate paths.
//!
//! `classify_path(path)` recovers the containing bill's composite identity
//! (congress, bill type, bill number) from positional path segments. Matchers
//! are ordered by specificity and tried in sequence; the anchor is the path
//! segment literally equal to `bills`, with the congress immediately before
//! it. Unrecognized layouts return a typed failure — this crate never
//! panics on input shape.

use std::path::{Path, PathBuf};

use billshelf_core::BillKey;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Anchor segment that splits congress from bill identity. Also the segment
/// the publisher replicates in the output tree.
pub const BILLS: &str = "bills";

/// Segment introducing version subdirectories in the raw tree.
pub const TEXT_VERSIONS: &str = "text-versions";

/// A successfully classified candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub key: BillKey,
    /// The version directory label when the path continues into
    /// `text-versions/<code>/`.
    pub version_code: Option<String>,
}

/// Errors from path classification.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// No known directory shape matched. Callers count and skip these
    /// rather than aborting the run.
    #[error("unrecognized path layout: {path}")]
    UnrecognizedLayout { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify a candidate path into a [`BillKey`] plus optional version code.
///
/// Shapes are tried in order:
/// 1. split layout — `<congress>/bills/<type>/<number>/…`
/// 2. combined historical layout — `<congress>/bills/<type><number>/…`
pub fn classify_path(path: &Path) -> Result<Classified, ClassifyError> {
    let segments: Vec<&str> = path
        .iter()
        .filter_map(|segment| segment.to_str())
        .collect();

    match_split_layout(&segments)
        .or_else(|| match_combined_layout(&segments))
        .ok_or_else(|| ClassifyError::UnrecognizedLayout {
            path: path.to_path_buf(),
        })
}

// ---------------------------------------------------------------------------
// Shape matchers
// ---------------------------------------------------------------------------

/// Index of the `bills` anchor, requiring a congress segment before it.
/// Enclosing directories may themselves be named `bills`, so every
/// occurrence is tried until one has a congress in front of it.
fn anchor_index(segments: &[&str]) -> Option<usize> {
    (1..segments.len()).find(|&at| segments[at] == BILLS && is_congress(segments[at - 1]))
}

/// `<congress>/bills/<type>/<number>/…`
fn match_split_layout(segments: &[&str]) -> Option<Classified> {
    let at = anchor_index(segments)?;
    let bill_type = segments.get(at + 1)?;
    let number = segments.get(at + 2)?;
    if !is_type_code(bill_type) || !is_number(number) {
        return None;
    }
    Some(Classified {
        key: BillKey::new(segments[at - 1], *bill_type, *number),
        version_code: version_code(segments, at + 3),
    })
}

/// `<congress>/bills/<type><number>/…` — older trees collapse type and
/// number into one directory (`hr85`). Normalised to the split key so the
/// published tree always has the split shape.
fn match_combined_layout(segments: &[&str]) -> Option<Classified> {
    let at = anchor_index(segments)?;
    let combined = segments.get(at + 1)?;
    let (bill_type, number) = split_combined(combined)?;
    Some(Classified {
        key: BillKey::new(segments[at - 1], bill_type, number),
        version_code: version_code(segments, at + 2),
    })
}

/// The segment after `text-versions`, when the remainder continues there.
fn version_code(segments: &[&str], from: usize) -> Option<String> {
    if segments.get(from).copied() != Some(TEXT_VERSIONS) {
        return None;
    }
    segments.get(from + 1).map(|code| code.to_string())
}

fn split_combined(segment: &str) -> Option<(&str, &str)> {
    let boundary = segment.find(|c: char| c.is_ascii_digit())?;
    let (bill_type, number) = segment.split_at(boundary);
    if !is_type_code(bill_type) || !is_number(number) {
        return None;
    }
    Some((bill_type, number))
}

fn is_congress(segment: &str) -> bool {
    is_number(segment)
}

fn is_number(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit())
}

fn is_type_code(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_lowercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
