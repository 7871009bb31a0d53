//! MODS source-document discovery.
//!
//! Search order inside a version directory:
//! 1. `mods.xml` directly in the directory
//! 2. one nested exactly one sub-directory down
//! 3. any `mods.xml` via a recursive walk
//! 4. a member of any `*.zip` archive whose name ends in `mods.xml`
//!
//! The first candidate that parses wins; the rest are ignored. When upstream
//! data carries conflicting descriptors at more than one of these locations
//! the fixed order is the only arbiter. Unreadable or malformed candidates
//! are logged at debug level and skipped.

use std::io::Read;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{io_err, SynthError};
use crate::mods::{parse_mods, ModsRecord};

/// Filename of a descriptor-source document.
pub const MODS_FILE: &str = "mods.xml";

/// A parsed source document plus its origin, for logging.
#[derive(Debug)]
pub struct FoundSource {
    pub record: ModsRecord,
    pub origin: PathBuf,
}

/// Locate and parse the first usable MODS document for `version_dir`.
///
/// `Ok(None)` means no candidate parsed; only directory enumeration failures
/// surface as errors.
pub fn find_and_parse(version_dir: &Path) -> Result<Option<FoundSource>, SynthError> {
    for candidate in file_candidates(version_dir)? {
        match std::fs::read_to_string(&candidate) {
            Ok(xml) => match parse_mods(&xml) {
                Ok(record) => {
                    return Ok(Some(FoundSource {
                        record,
                        origin: candidate,
                    }))
                }
                Err(err) => {
                    tracing::debug!("skipping malformed source {}: {err}", candidate.display());
                }
            },
            Err(err) => {
                tracing::debug!("skipping unreadable source {}: {err}", candidate.display());
            }
        }
    }

    for archive in zip_candidates(version_dir)? {
        match mods_from_archive(&archive) {
            Ok(Some((member, xml))) => match parse_mods(&xml) {
                Ok(record) => {
                    return Ok(Some(FoundSource {
                        record,
                        origin: archive.join(member),
                    }))
                }
                Err(err) => {
                    tracing::debug!(
                        "skipping malformed archived source in {}: {err}",
                        archive.display()
                    );
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::debug!("skipping unreadable archive {}: {err}", archive.display());
            }
        }
    }

    Ok(None)
}

/// Direct, nested, and recursive `mods.xml` candidates, deduplicated, in
/// search order.
fn file_candidates(version_dir: &Path) -> Result<Vec<PathBuf>, SynthError> {
    let mut candidates = Vec::new();
    let mut push = |path: PathBuf| {
        if path.is_file() && !candidates.contains(&path) {
            candidates.push(path);
        }
    };

    push(version_dir.join(MODS_FILE));

    for subdir in sorted_entries(version_dir)? {
        if subdir.is_dir() {
            push(subdir.join(MODS_FILE));
        }
    }

    let mut walked: Vec<PathBuf> = WalkDir::new(version_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy() == MODS_FILE)
        .map(|entry| entry.into_path())
        .collect();
    walked.sort();
    for path in walked {
        push(path);
    }

    Ok(candidates)
}

/// `*.zip` archives directly in the version directory, sorted.
fn zip_candidates(version_dir: &Path) -> Result<Vec<PathBuf>, SynthError> {
    let archives = sorted_entries(version_dir)?
        .into_iter()
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("zip"))
                    .unwrap_or(false)
        })
        .collect();
    Ok(archives)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SynthError> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    Ok(entries)
}

/// Pull the first member whose name ends in `mods.xml` out of the archive.
fn mods_from_archive(archive_path: &Path) -> Result<Option<(String, String)>, SynthError> {
    let file = std::fs::File::open(archive_path).map_err(|e| io_err(archive_path, e))?;
    let mut archive = match zip::ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(err) => {
            return Err(io_err(
                archive_path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, err),
            ))
        }
    };

    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| name.ends_with(MODS_FILE))
        .map(str::to_string)
        .collect();
    names.sort();
    let Some(name) = names.into_iter().next() else {
        return Ok(None);
    };

    let mut member = match archive.by_name(&name) {
        Ok(member) => member,
        Err(err) => {
            return Err(io_err(
                archive_path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, err),
            ))
        }
    };
    let mut xml = String::new();
    member
        .read_to_string(&mut xml)
        .map_err(|e| io_err(archive_path, e))?;
    Ok(Some((name, xml)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
