//! `billshelf manifest` — build local and GCS manifest documents.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use billshelf_publish::manifest::{build_manifests, BilltextSource, ManifestConfig};

/// Arguments for `billshelf manifest`.
#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Raw data tree (votes, bill metadata, text-version fallback).
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,

    /// Published latest-bill-text tree.
    #[arg(long, default_value = "latest_data")]
    pub latest_root: PathBuf,

    /// Directory the manifest documents are written into.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// GCS bucket name; falls back to $GCS_BUCKET.
    #[arg(long)]
    pub bucket: Option<String>,

    /// Object-key prefix inside the bucket; falls back to $GCS_PREFIX.
    #[arg(long)]
    pub prefix: Option<String>,
}

impl ManifestArgs {
    pub fn run(self) -> Result<ExitCode> {
        let config = ManifestConfig {
            data_root: self.data_root,
            latest_root: self.latest_root,
            out_dir: self.out_dir,
            bucket: normalize(self.bucket, "GCS_BUCKET"),
            prefix: normalize(self.prefix, "GCS_PREFIX"),
        };

        let report = build_manifests(&config).context("manifest build failed")?;

        for (name, count) in &report.written {
            println!("{} {name}: {count} file(s)", "✓".green().bold());
        }
        let source = match report.billtext_source {
            BilltextSource::Published => "published tree",
            BilltextSource::RawData => "raw data tree (no published tree found)",
        };
        println!("bill text gathered from the {source}");

        Ok(ExitCode::SUCCESS)
    }
}

/// CLI flag first, environment variable second; slashes trimmed, blanks
/// treated as unset.
fn normalize(flag: Option<String>, env_var: &str) -> Option<String> {
    flag.or_else(|| std::env::var(env_var).ok())
        .map(|value| value.trim_matches('/').to_string())
        .filter(|value| !value.is_empty())
}
