//! Output formatting for analysis results.
//!
//! Two outputs are produced:
//! - Pretty: a human-readable report written to any `io::Write` (stdout in the CLI)
//! - JSON: the structured report persisted to disk

use anyhow::Context;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::analyze::{FileRecord, Summary};

const RULE: &str = "==================================================";
const THIN_RULE: &str = "--------------------------------------------------";

// =============================================================================
// JSON Format
// =============================================================================

/// Structured report persisted after each run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: String,
    pub summary: Summary,
    pub files: Vec<FileRecord>,
}

impl Report {
    /// Build a report stamped with the current time.
    pub fn new(files: Vec<FileRecord>) -> Self {
        Self::with_timestamp(now_timestamp(), files)
    }

    /// Build a report with an explicit timestamp.
    pub fn with_timestamp(timestamp: String, files: Vec<FileRecord>) -> Self {
        Self {
            timestamp,
            summary: Summary::aggregate(&files),
            files,
        }
    }
}

/// Current local time as RFC 3339, or UTC when the local offset is unknown.
pub fn now_timestamp() -> String {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// Write the report as indented JSON, replacing any existing file.
///
/// Non-ASCII text is written as-is rather than escaped.
pub fn write_json(path: &Path, report: &Report) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing report to {}", path.display()))?;
    tracing::debug!(path = %path.display(), files = report.files.len(), "report written");
    Ok(())
}

/// Read a report previously written by `write_json`.
pub fn read_json(path: &Path) -> anyhow::Result<Report> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading report from {}", path.display()))?;
    let report = serde_json::from_str(&content)
        .with_context(|| format!("parsing report {}", path.display()))?;
    Ok(report)
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Base name of a recorded path, falling back to the full path.
fn base_name(file_path: &str) -> String {
    Path::new(file_path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.to_string())
}

/// Header banner followed by the analyzed root.
pub fn write_header<W: Write>(out: &mut W, root: &Path) -> io::Result<()> {
    writeln!(
        out,
        "{} v{}",
        "pytally".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}{}", "Root: ".dimmed(), root.display())
}

pub fn write_missing_root<W: Write>(out: &mut W, root: &Path) -> io::Result<()> {
    writeln!(
        out,
        "{} analysis root does not exist: {}",
        "Error:".red(),
        root.display()
    )
}

pub fn write_discovered<W: Write>(out: &mut W, count: usize, extension: &str) -> io::Result<()> {
    writeln!(out, "{}{} {} files", "Discovered: ".dimmed(), count, extension)
}

pub fn write_no_files<W: Write>(out: &mut W, extension: &str) -> io::Result<()> {
    writeln!(out, "{} no {} files found", "Warning:".yellow(), extension)
}

/// One progress line, emitted before the file is analyzed.
pub fn write_progress<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(
        out,
        "{}{}",
        "Analyzing: ".dimmed(),
        base_name(&path.to_string_lossy())
    )
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Summary".bold())?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Total files:     {}", summary.total_files)?;
    writeln!(out, "Total lines:     {}", summary.total_lines)?;
    writeln!(out, "Total functions: {}", summary.total_functions)?;
    writeln!(out, "Total classes:   {}", summary.total_classes)
}

/// Per-file detail block, in record order.
pub fn write_details<W: Write>(out: &mut W, records: &[FileRecord]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Files".bold())?;
    writeln!(out, "{}", THIN_RULE)?;

    for record in records {
        match record {
            FileRecord::Success {
                file_path,
                lines,
                functions,
                classes,
                imports,
            } => writeln!(
                out,
                "{} {}: {} lines, {} functions, {} classes, {} imports",
                "ok  ".green(),
                base_name(file_path),
                lines,
                functions,
                classes,
                imports
            )?,
            FileRecord::Failure { file_path, error } => writeln!(
                out,
                "{} {}: {}",
                "FAIL".red(),
                base_name(file_path),
                error
            )?,
        }
    }
    Ok(())
}

pub fn write_saved<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Saved report to {}", path.display())
}
