//! End-to-end pipeline tests over real temp trees.
//!
//! File mtimes are pinned with `filetime` so the recency ordering is
//! deterministic inside the tests.

use std::fs;
use std::path::{Path, PathBuf};

use billshelf_publish::{pipeline, PublishError};
use filetime::{set_file_mtime, FileTime};
use tempfile::TempDir;

// 2023-05-01T00:00:00Z / 2023-06-01T00:00:00Z
const MAY_FIRST: i64 = 1_682_899_200;
const JUNE_FIRST: i64 = 1_685_577_600;

fn version_dir(data_root: &Path, congress: &str, bill: &str, version: &str) -> PathBuf {
    let dir = data_root
        .join(congress)
        .join("bills")
        .join(bill)
        .join("text-versions")
        .join(version);
    fs::create_dir_all(&dir).expect("mkdir");
    dir
}

fn write_descriptor(dir: &Path, body: &str, mtime: i64) {
    let path = dir.join("data.json");
    fs::write(&path, body).expect("write descriptor");
    set_file_mtime(&path, FileTime::from_unix_time(mtime, 0)).expect("set mtime");
}

fn published_descriptor(out_root: &Path, congress: &str, bill_type: &str, number: &str) -> PathBuf {
    out_root
        .join(congress)
        .join("bills")
        .join(bill_type)
        .join(number)
        .join("data.json")
}

#[test]
fn picks_latest_version_per_bill() {
    let root = TempDir::new().expect("tempdir");
    let data = root.path().join("data");
    let out = root.path().join("latest_data");

    let ih = version_dir(&data, "118", "hr/85", "ih");
    write_descriptor(&ih, r#"{"issued_on":"2023-05-01","version_code":"ih"}"#, MAY_FIRST);
    let eh = version_dir(&data, "118", "hr/85", "eh");
    write_descriptor(&eh, r#"{"issued_on":"2023-06-01","version_code":"eh"}"#, JUNE_FIRST);

    let summary = pipeline::run(&data, &out, false).expect("run");
    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.classified, 2);
    assert_eq!(summary.bills, 1);
    assert_eq!(summary.published, 1);

    let published = fs::read_to_string(published_descriptor(&out, "118", "hr", "85"))
        .expect("read published");
    assert!(published.contains("\"eh\""), "later version must win");
}

#[test]
fn descriptor_less_version_wins_via_mtime_fallback() {
    // hr85 under congress 118: one version issued 2023-05-01, a second with
    // no descriptor but a 2023-06-01 mtime. The second wins on the
    // mtime-derived date.
    let root = TempDir::new().expect("tempdir");
    let data = root.path().join("data");
    let out = root.path().join("latest_data");

    let ih = version_dir(&data, "118", "hr/85", "ih");
    write_descriptor(&ih, r#"{"issued_on":"2023-05-01"}"#, MAY_FIRST);

    let eh = version_dir(&data, "118", "hr/85", "eh");
    set_file_mtime(&eh, FileTime::from_unix_time(JUNE_FIRST, 0)).expect("set dir mtime");

    let summary = pipeline::run(&data, &out, false).expect("run");
    assert_eq!(summary.synthesized, 1);
    assert_eq!(summary.bills, 1);

    let published = fs::read_to_string(published_descriptor(&out, "118", "hr", "85"))
        .expect("read published");
    assert!(
        published.contains("2023-06-01"),
        "mtime-dated synthesized version must win: {published}"
    );
    assert!(published.contains("\"eh\""));
}

#[test]
fn zero_bills_fails_without_creating_output() {
    let root = TempDir::new().expect("tempdir");
    let data = root.path().join("data");
    fs::create_dir_all(&data).expect("mkdir");
    let out = root.path().join("latest_data");

    let err = pipeline::run(&data, &out, false).expect_err("must fail");
    assert!(matches!(err, PublishError::NothingToPublish));
    assert!(!out.exists(), "output tree must not be created");
}

#[test]
fn zero_bills_leaves_existing_published_tree_intact() {
    let root = TempDir::new().expect("tempdir");
    let data = root.path().join("data");
    let out = root.path().join("latest_data");

    let ih = version_dir(&data, "118", "hr/85", "ih");
    write_descriptor(&ih, r#"{"issued_on":"2023-05-01"}"#, MAY_FIRST);
    pipeline::run(&data, &out, false).expect("seed published tree");

    let empty = root.path().join("empty");
    fs::create_dir_all(&empty).expect("mkdir");
    let err = pipeline::run(&empty, &out, false).expect_err("must fail");
    assert!(matches!(err, PublishError::NothingToPublish));
    assert!(
        published_descriptor(&out, "118", "hr", "85").is_file(),
        "previously published tree must survive"
    );
}

#[test]
fn rerun_is_idempotent_byte_for_byte() {
    let root = TempDir::new().expect("tempdir");
    let data = root.path().join("data");
    let out = root.path().join("latest_data");

    let ih = version_dir(&data, "118", "hr/85", "ih");
    write_descriptor(&ih, r#"{"issued_on":"2023-05-01"}"#, MAY_FIRST);
    let s7 = version_dir(&data, "117", "s/7", "enr");
    write_descriptor(&s7, r#"{"issued_on":"2021-12-01"}"#, MAY_FIRST);

    pipeline::run(&data, &out, false).expect("first run");
    let first_hr = fs::read(published_descriptor(&out, "118", "hr", "85")).expect("read");
    let first_s = fs::read(published_descriptor(&out, "117", "s", "7")).expect("read");

    let summary = pipeline::run(&data, &out, false).expect("second run");
    assert_eq!(summary.bills, 2);
    let second_hr = fs::read(published_descriptor(&out, "118", "hr", "85")).expect("read");
    let second_s = fs::read(published_descriptor(&out, "117", "s", "7")).expect("read");

    assert_eq!(first_hr, second_hr);
    assert_eq!(first_s, second_s);
}

#[test]
fn dry_run_touches_neither_tree() {
    let root = TempDir::new().expect("tempdir");
    let data = root.path().join("data");
    let out = root.path().join("latest_data");

    let eh = version_dir(&data, "118", "hr/85", "eh");
    fs::write(
        eh.join("mods.xml"),
        "<mods><dateIssued>2023-06-01</dateIssued></mods>",
    )
    .expect("write mods");

    let summary = pipeline::run(&data, &out, true).expect("dry run");
    assert_eq!(summary.bills, 1);
    assert_eq!(summary.synthesized, 1);
    assert!(summary.dry_run);
    assert!(!out.exists(), "dry run must not create the published tree");
    assert!(
        !eh.join("data.json").exists(),
        "dry run must not write synthesized descriptors"
    );
}

#[test]
fn unrecognized_layouts_are_skipped_not_fatal() {
    let root = TempDir::new().expect("tempdir");
    let data = root.path().join("data");
    let out = root.path().join("latest_data");

    let good = version_dir(&data, "118", "hr/85", "ih");
    write_descriptor(&good, r#"{"issued_on":"2023-05-01"}"#, MAY_FIRST);

    // Congress segment is not numeric — unrecognized.
    let odd = data
        .join("archive")
        .join("bills")
        .join("hr")
        .join("9")
        .join("text-versions")
        .join("ih");
    fs::create_dir_all(&odd).expect("mkdir");
    fs::write(odd.join("data.json"), "{}").expect("write");

    let summary = pipeline::run(&data, &out, false).expect("run");
    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.bills, 1);
}

#[test]
fn combined_and_split_layouts_group_to_the_same_bill() {
    let root = TempDir::new().expect("tempdir");
    let data = root.path().join("data");
    let out = root.path().join("latest_data");

    let old_shape = version_dir(&data, "118", "hr85", "ih");
    write_descriptor(&old_shape, r#"{"issued_on":"2023-05-01"}"#, MAY_FIRST);
    let new_shape = version_dir(&data, "118", "hr/85", "eh");
    write_descriptor(&new_shape, r#"{"issued_on":"2023-06-01"}"#, JUNE_FIRST);

    let summary = pipeline::run(&data, &out, false).expect("run");
    assert_eq!(summary.bills, 1, "both shapes must group under one key");
    let published = fs::read_to_string(published_descriptor(&out, "118", "hr", "85"))
        .expect("read published");
    assert!(published.contains("2023-06-01"));
}
