//! Local and cloud-storage manifest documents.
//!
//! Each manifest is a `{"files": [...]}` JSON document listing descriptor
//! files in sorted order. Bill text prefers the curated published tree and
//! falls back to raw `text-versions` descriptors when no published tree
//! exists yet. Every manifest gets a `-gcs` twin mapping local paths to
//! `https://storage.googleapis.com/` URLs when a bucket is configured.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use billshelf_classify::{BILLS, TEXT_VERSIONS};
use billshelf_core::descriptor;

use crate::error::{io_err, PublishError};

/// Where manifests are gathered from and written to.
#[derive(Debug, Clone)]
pub struct ManifestConfig {
    /// Raw data tree (votes, bill metadata, text-version fallback).
    pub data_root: PathBuf,
    /// Published latest-bill-text tree.
    pub latest_root: PathBuf,
    /// Directory the manifest documents are written into.
    pub out_dir: PathBuf,
    /// GCS bucket name; without one the `-gcs` manifests carry empty strings.
    pub bucket: Option<String>,
    /// Optional object-key prefix inside the bucket.
    pub prefix: Option<String>,
}

/// Which tree fed the bill-text manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BilltextSource {
    Published,
    RawData,
}

/// Per-manifest outcome.
#[derive(Debug)]
pub struct ManifestReport {
    /// Manifest filename → number of files listed.
    pub written: Vec<(String, usize)>,
    pub billtext_source: BilltextSource,
}

#[derive(Serialize)]
struct ManifestDoc {
    files: Vec<String>,
}

/// Build all manifest documents into `config.out_dir`.
pub fn build_manifests(config: &ManifestConfig) -> Result<ManifestReport, PublishError> {
    let votes = gather(&config.data_root, is_votes_entry);
    let bills = gather(&config.data_root, is_bill_metadata_entry);

    let (billtext, billtext_source) = if config.latest_root.is_dir() {
        (
            gather(&config.latest_root, is_published_billtext_entry),
            BilltextSource::Published,
        )
    } else {
        (
            gather(&config.data_root, is_raw_billtext_entry),
            BilltextSource::RawData,
        )
    };

    let mut report = ManifestReport {
        written: Vec::new(),
        billtext_source,
    };

    for (name, files) in [
        ("votes-manifest.json", &votes),
        ("bills-manifest.json", &bills),
        ("billtext-manifest.json", &billtext),
    ] {
        write_manifest(&config.out_dir, name, files)?;
        report.written.push((name.to_string(), files.len()));

        let gcs_name = name.replace(".json", "-gcs.json");
        let gcs_files: Vec<String> = files
            .iter()
            .map(|local| {
                let object = object_path(
                    local,
                    config,
                    name == "billtext-manifest.json"
                        && billtext_source == BilltextSource::Published,
                );
                match config.bucket.as_deref() {
                    Some(bucket) => {
                        format!("https://storage.googleapis.com/{bucket}/{object}")
                    }
                    None => String::new(),
                }
            })
            .collect();
        write_manifest(&config.out_dir, &gcs_name, &gcs_files)?;
        report.written.push((gcs_name, gcs_files.len()));
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Gathering
// ---------------------------------------------------------------------------

/// Sorted descriptor paths under `root` whose relative segments satisfy
/// `matches`. Paths keep the root prefix, `/`-separated.
fn gather(root: &Path, matches: impl Fn(&[&str]) -> bool) -> Vec<String> {
    if !root.is_dir() {
        return Vec::new();
    }
    let mut files: Vec<String> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let segments: Vec<&str> = rel.iter().filter_map(|s| s.to_str()).collect();
            matches(&segments)
        })
        .map(|entry| slash_path(entry.path()))
        .collect();
    files.sort();
    files
}

/// `…/votes/<year>/<roll>/data.json`
fn is_votes_entry(segments: &[&str]) -> bool {
    segments.len() >= 4
        && segments[segments.len() - 1] == descriptor::FILE_NAME
        && segments[segments.len() - 4] == "votes"
}

/// `…/bills/<bill>/data.json` — per-bill metadata in the raw tree.
fn is_bill_metadata_entry(segments: &[&str]) -> bool {
    segments.len() >= 3
        && segments[segments.len() - 1] == descriptor::FILE_NAME
        && segments[segments.len() - 3] == BILLS
}

/// `…/bills/<type>/<number>/data.json` — the published split shape.
fn is_published_billtext_entry(segments: &[&str]) -> bool {
    segments.len() >= 4
        && segments[segments.len() - 1] == descriptor::FILE_NAME
        && segments[segments.len() - 4] == BILLS
}

/// `…/text-versions/<code>/data.json` under a bills subtree.
fn is_raw_billtext_entry(segments: &[&str]) -> bool {
    segments.len() >= 3
        && segments[segments.len() - 1] == descriptor::FILE_NAME
        && segments[segments.len() - 3] == TEXT_VERSIONS
        && segments.contains(&BILLS)
}

// ---------------------------------------------------------------------------
// GCS mapping
// ---------------------------------------------------------------------------

/// Map a local manifest path to its object key: the published tree is
/// exposed under `billtext/`, everything else under `data/`.
fn object_path(local: &str, config: &ManifestConfig, from_published: bool) -> String {
    let mapped = if from_published {
        remap(local, &config.latest_root, "billtext")
    } else {
        remap(local, &config.data_root, "data")
    };
    match config.prefix.as_deref() {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}/{mapped}"),
        _ => mapped,
    }
}

fn remap(local: &str, root: &Path, replacement: &str) -> String {
    let mut root_str = slash_path(root);
    if !root_str.ends_with('/') {
        root_str.push('/');
    }
    let rel = local.strip_prefix(&root_str).unwrap_or(local);
    format!("{replacement}/{rel}")
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn write_manifest(out_dir: &Path, name: &str, files: &[String]) -> Result<(), PublishError> {
    std::fs::create_dir_all(out_dir).map_err(|e| io_err(out_dir, e))?;
    let doc = ManifestDoc {
        files: files.to_vec(),
    };
    let json = serde_json::to_string(&doc)?;
    let path = out_dir.join(name);
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, &path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(&path, e));
    }
    tracing::info!("{name} built: {} files", files.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
