//! Lenient date handling for descriptor metadata.
//!
//! Upstream descriptors carry anything from full RFC 3339 timestamps to bare
//! `YYYY-MM-DD` strings to free text. Parsing degrades rather than errors:
//! an unusable string is "unknown" and the caller substitutes the file's
//! modification time. A parsed value lacking timezone information is treated
//! as UTC.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a descriptor date string into an instant.
///
/// Accepted forms, tried in order:
/// 1. RFC 3339 with an explicit offset; a trailing literal `Z` is normalised
///    to `+00:00` first.
/// 2. A naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp, assumed UTC.
/// 3. A bare `YYYY-MM-DD` date (taken from the part before any `T`),
///    midnight UTC.
///
/// Anything else yields `None` — never an error.
pub fn parse_when(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = match trimmed.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => trimmed.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    let date_part = match normalized.split_once('T') {
        Some((before, _)) => before,
        None => normalized.as_str(),
    };
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

/// Modification time of `path` as a UTC instant.
///
/// Unreadable metadata degrades to the Unix epoch so a broken candidate loses
/// every comparison instead of aborting the run.
pub fn mtime_utc(path: &Path) -> DateTime<Utc> {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Calendar-date rendering (`YYYY-MM-DD`) of an instant, for synthesized
/// `issued_on` fields.
pub fn date_only(when: DateTime<Utc>) -> String {
    when.format("%Y-%m-%d").to_string()
}
