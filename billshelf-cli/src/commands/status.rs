//! `billshelf status` — published-tree visibility.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};
use walkdir::WalkDir;

use billshelf_classify::classify_path;
use billshelf_core::descriptor;

/// Arguments for `billshelf status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Published tree to summarize.
    #[arg(long, default_value = "latest_data")]
    pub out_root: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Default, Clone)]
struct CongressStatus {
    bills: usize,
    by_type: BTreeMap<String, usize>,
}

#[derive(Serialize)]
struct StatusJson {
    out_root: PathBuf,
    bills: usize,
    congresses: Vec<CongressJson>,
}

#[derive(Serialize)]
struct CongressJson {
    congress: String,
    bills: usize,
    by_type: BTreeMap<String, usize>,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "congress")]
    congress: String,
    #[tabled(rename = "bills")]
    bills: usize,
    #[tabled(rename = "by type")]
    by_type: String,
}

impl StatusArgs {
    pub fn run(self) -> Result<ExitCode> {
        if !self.out_root.is_dir() {
            println!(
                "No published tree at '{}'. Run `billshelf build` first.",
                self.out_root.display()
            );
            return Ok(ExitCode::SUCCESS);
        }

        let report = summarize(&self.out_root);
        if self.json {
            let payload = StatusJson {
                out_root: self.out_root.clone(),
                bills: report.values().map(|c| c.bills).sum(),
                congresses: report
                    .into_iter()
                    .map(|(congress, status)| CongressJson {
                        congress,
                        bills: status.bills,
                        by_type: status.by_type,
                    })
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize status")?
            );
            return Ok(ExitCode::SUCCESS);
        }

        print_table(&self.out_root, report);
        Ok(ExitCode::SUCCESS)
    }
}

/// Count published descriptors per congress and bill type.
fn summarize(out_root: &Path) -> BTreeMap<String, CongressStatus> {
    let mut report: BTreeMap<String, CongressStatus> = BTreeMap::new();
    for entry in WalkDir::new(out_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name() == descriptor::FILE_NAME)
    {
        let Ok(classified) = classify_path(entry.path()) else {
            continue;
        };
        let congress = report.entry(classified.key.congress.clone()).or_default();
        congress.bills += 1;
        *congress
            .by_type
            .entry(classified.key.bill_type.clone())
            .or_default() += 1;
    }
    report
}

fn print_table(out_root: &Path, report: BTreeMap<String, CongressStatus>) {
    let total: usize = report.values().map(|c| c.bills).sum();
    println!(
        "Billshelf v{} | {} | {} congress(es) | {} bill(s)",
        env!("CARGO_PKG_VERSION"),
        out_root.display(),
        report.len(),
        total,
    );

    if report.is_empty() {
        println!("Published tree is empty.");
        return;
    }

    let rows: Vec<StatusTableRow> = report
        .into_iter()
        .map(|(congress, status)| StatusTableRow {
            congress,
            bills: status.bills,
            by_type: status
                .by_type
                .into_iter()
                .map(|(bill_type, count)| format!("{bill_type} {count}"))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
