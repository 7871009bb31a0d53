//! Domain types for the billshelf selection pipeline.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. Candidate records are immutable once discovered and regenerated on
//! every run.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BillKey
// ---------------------------------------------------------------------------

/// Composite identity of one bill: congress (session), type code, number.
///
/// The grouping key for version records. `Ord` on (congress, type, number)
/// so grouped maps iterate in a reproducible order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BillKey {
    pub congress: String,
    pub bill_type: String,
    pub number: String,
}

impl BillKey {
    pub fn new(
        congress: impl Into<String>,
        bill_type: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self {
            congress: congress.into(),
            bill_type: bill_type.into(),
            number: number.into(),
        }
    }

    /// `hr85-118` style identifier, used when a descriptor's bill id is
    /// synthesized from the path.
    pub fn bill_id(&self) -> String {
        format!("{}{}-{}", self.bill_type, self.number, self.congress)
    }
}

impl fmt::Display for BillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", self.bill_type, self.number, self.congress)
    }
}

// ---------------------------------------------------------------------------
// Recency ordering
// ---------------------------------------------------------------------------

/// The compound ordering every "best record" decision uses: primary issued
/// date (descending preference), then file modification time as tiebreaker.
///
/// A record with no parseable issued date must set `effective` to its
/// `modified` time, so a missing date competes on the file's own recency
/// rather than winning or losing by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecencyKey {
    pub effective: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl RecencyKey {
    /// Build the key from an optional parsed issued date plus the file's
    /// modification time.
    pub fn new(issued: Option<DateTime<Utc>>, modified: DateTime<Utc>) -> Self {
        Self {
            effective: issued.unwrap_or(modified),
            modified,
        }
    }
}

/// Reduce `items` to the single most-recent one under [`RecencyKey`] order.
///
/// The running best is replaced only on a strictly greater key, so ties keep
/// the first-encountered item (stable).
pub fn best_by_recency<T, F>(items: impl IntoIterator<Item = T>, recency: F) -> Option<T>
where
    F: Fn(&T) -> RecencyKey,
{
    let mut best: Option<(RecencyKey, T)> = None;
    for item in items {
        let key = recency(&item);
        let replace = match &best {
            None => true,
            Some((current, _)) => key > *current,
        };
        if replace {
            best = Some((key, item));
        }
    }
    best.map(|(_, item)| item)
}

// ---------------------------------------------------------------------------
// CandidateRecord
// ---------------------------------------------------------------------------

/// One discovered text-version record, ready for selection.
#[derive(Debug, Clone)]
pub struct CandidateRecord {
    /// Location of the version's descriptor file.
    pub path: PathBuf,
    pub key: BillKey,
    /// Directory-derived version label (`ih`, `eh`, ...), when the layout
    /// carries one.
    pub version_code: Option<String>,
    /// The raw issued date string from the descriptor, if any.
    pub issued_on: Option<String>,
    pub recency: RecencyKey,
    /// Resource-kind → URL, as recorded in the descriptor.
    pub urls: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
