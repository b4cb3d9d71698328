//! Tests for the structured report format.
//!
//! These tests verify the JSON written to disk keeps the stable schema:
//! `timestamp`, `summary` and `files`, with success and failure records told
//! apart by the `error` key.

use std::path::PathBuf;

use pytally::cli::run_analysis;
use serde_json::Value;
use tempfile::TempDir;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Run against the fixture project and return the parsed JSON output.
fn run_and_get_json() -> Value {
    let out = TempDir::new().unwrap();
    let output = out.path().join("analysis_result.json");
    let mut stdout = Vec::new();
    run_analysis(&testdata_path().join("project"), &output, &mut stdout)
        .expect("analysis should succeed");

    let text = std::fs::read_to_string(&output).expect("report should be written");
    serde_json::from_str(&text).expect("report should be valid JSON")
}

#[test]
fn test_top_level_keys() {
    let report = run_and_get_json();
    let object = report.as_object().expect("report should be an object");

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["files", "summary", "timestamp"]);
}

#[test]
fn test_timestamp_format() {
    let report = run_and_get_json();
    let ts = report["timestamp"].as_str().expect("timestamp should be a string");
    assert!(OffsetDateTime::parse(ts, &Rfc3339).is_ok(), "got {}", ts);
}

#[test]
fn test_summary_fields() {
    let report = run_and_get_json();
    let summary = &report["summary"];

    for key in ["total_files", "total_lines", "total_functions", "total_classes"] {
        assert!(summary[key].is_u64(), "{} should be a non-negative integer", key);
    }
    assert_eq!(summary.as_object().unwrap().len(), 4);
    assert_eq!(
        summary["total_files"].as_u64().unwrap() as usize,
        report["files"].as_array().unwrap().len()
    );
}

#[test]
fn test_file_record_variants() {
    let report = run_and_get_json();
    let files = report["files"].as_array().unwrap();

    let mut successes = 0;
    let mut failures = 0;
    for record in files {
        let object = record.as_object().unwrap();
        assert!(object["file_path"].is_string());

        if object.contains_key("error") {
            failures += 1;
            assert_eq!(object.len(), 2);
            assert!(!object["error"].as_str().unwrap().is_empty());
        } else {
            successes += 1;
            for key in ["lines", "functions", "classes", "imports"] {
                assert!(object[key].is_u64(), "{} should be a non-negative integer", key);
            }
            assert_eq!(object.len(), 5);
        }
    }

    assert_eq!(successes, 3);
    assert_eq!(failures, 1);
}

#[test]
fn test_totals_sum_successes() {
    let report = run_and_get_json();
    let files = report["files"].as_array().unwrap();

    let sum = |key: &str| -> u64 {
        files
            .iter()
            .filter(|r| r.get("error").is_none())
            .map(|r| r[key].as_u64().unwrap())
            .sum()
    };

    assert_eq!(report["summary"]["total_lines"].as_u64().unwrap(), sum("lines"));
    assert_eq!(
        report["summary"]["total_functions"].as_u64().unwrap(),
        sum("functions")
    );
    assert_eq!(
        report["summary"]["total_classes"].as_u64().unwrap(),
        sum("classes")
    );
}
