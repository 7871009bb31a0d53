//! Descriptor → candidate-record metadata extraction.
//!
//! This boundary never fails: a malformed or unreadable descriptor degrades
//! to the file's modification time, and an unparseable date string competes
//! on file recency instead of erroring.

use std::path::Path;

use billshelf_core::dates::{mtime_utc, parse_when};
use billshelf_core::descriptor::{self, Descriptor};
use billshelf_core::{BillKey, CandidateRecord, RecencyKey};

/// Build the candidate record for the descriptor at `descriptor_path`.
pub fn extract_candidate(
    descriptor_path: &Path,
    key: BillKey,
    version_code: Option<String>,
) -> CandidateRecord {
    let loaded = match descriptor::load(descriptor_path) {
        Ok(loaded) => Some(loaded),
        Err(err) => {
            tracing::debug!(
                "descriptor unusable, falling back to mtime: {}: {err}",
                descriptor_path.display()
            );
            None
        }
    };

    let issued_on = loaded
        .as_ref()
        .and_then(|d| d.issued_date())
        .map(str::to_string);
    let modified = mtime_utc(descriptor_path);

    CandidateRecord {
        path: descriptor_path.to_path_buf(),
        key,
        version_code: version_code
            .or_else(|| loaded.as_ref().and_then(|d| d.version_code.clone())),
        recency: RecencyKey::new(issued_on.as_deref().and_then(parse_when), modified),
        issued_on,
        urls: loaded.map(|d| d.urls).unwrap_or_default(),
    }
}

/// Candidate record for a descriptor that exists only in memory (dry runs
/// synthesize without writing back). Recency falls back to the version
/// directory's own mtime since there is no descriptor file to stat.
pub fn unwritten_candidate(
    version_dir: &Path,
    synthesized: &Descriptor,
    key: BillKey,
    version_code: Option<String>,
) -> CandidateRecord {
    let issued_on = synthesized.issued_date().map(str::to_string);
    let modified = mtime_utc(version_dir);

    CandidateRecord {
        path: version_dir.join(descriptor::FILE_NAME),
        key,
        version_code: version_code.or_else(|| synthesized.version_code.clone()),
        recency: RecencyKey::new(issued_on.as_deref().and_then(parse_when), modified),
        issued_on,
        urls: synthesized.urls.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use billshelf_core::dates::parse_when;
    use filetime::{set_file_mtime, FileTime};
    use std::fs;
    use tempfile::TempDir;

    fn key() -> BillKey {
        BillKey::new("118", "hr", "85")
    }

    #[test]
    fn extracts_issued_date_and_urls() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"{"issued_on":"2023-05-01","urls":{"pdf":"https://example.gov/a.pdf"}}"#,
        )
        .expect("write");

        let candidate = extract_candidate(&path, key(), Some("ih".into()));
        assert_eq!(candidate.issued_on.as_deref(), Some("2023-05-01"));
        assert_eq!(candidate.recency.effective, parse_when("2023-05-01").unwrap());
        assert_eq!(candidate.version_code.as_deref(), Some("ih"));
        assert_eq!(candidate.urls.len(), 1);
    }

    #[test]
    fn legacy_date_fields_are_honoured() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"issued":"2022-03-04"}"#).expect("write");

        let candidate = extract_candidate(&path, key(), None);
        assert_eq!(candidate.recency.effective, parse_when("2022-03-04").unwrap());
    }

    #[test]
    fn malformed_descriptor_degrades_to_mtime() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").expect("write");
        set_file_mtime(&path, FileTime::from_unix_time(1_685_577_600, 0)).expect("set mtime");

        let candidate = extract_candidate(&path, key(), None);
        assert!(candidate.issued_on.is_none());
        assert_eq!(candidate.recency.effective, parse_when("2023-06-01").unwrap());
        assert_eq!(candidate.recency.effective, candidate.recency.modified);
    }

    #[test]
    fn unparseable_date_string_competes_on_file_recency() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"issued_on":"sometime in spring"}"#).expect("write");
        set_file_mtime(&path, FileTime::from_unix_time(1_672_531_200, 0)).expect("set mtime");

        let candidate = extract_candidate(&path, key(), None);
        assert_eq!(candidate.issued_on.as_deref(), Some("sometime in spring"));
        assert_eq!(candidate.recency.effective, parse_when("2023-01-01").unwrap());
    }

    #[test]
    fn version_code_from_descriptor_when_path_has_none() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"issued_on":"2023-05-01","version_code":"enr"}"#).expect("write");

        let candidate = extract_candidate(&path, key(), None);
        assert_eq!(candidate.version_code.as_deref(), Some("enr"));
    }
}
