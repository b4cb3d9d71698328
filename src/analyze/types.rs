//! Core types for analysis results.

use serde::{Deserialize, Serialize};

/// Outcome of analyzing one file.
///
/// Serialized without a tag; the two variants are told apart by the
/// presence of the `error` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileRecord {
    Failure {
        file_path: String,
        error: String,
    },
    Success {
        file_path: String,
        lines: usize,
        functions: usize,
        classes: usize,
        imports: usize,
    },
}

impl FileRecord {
    pub fn file_path(&self) -> &str {
        match self {
            FileRecord::Failure { file_path, .. } | FileRecord::Success { file_path, .. } => {
                file_path
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FileRecord::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FileRecord::Failure { error, .. } => Some(error),
            FileRecord::Success { .. } => None,
        }
    }
}

/// Totals across all analyzed files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_functions: usize,
    pub total_classes: usize,
}

impl Summary {
    /// Fold per-file records into totals.
    ///
    /// Every record counts toward `total_files`; only successes add to the
    /// numeric totals.
    pub fn aggregate(records: &[FileRecord]) -> Self {
        records.iter().fold(
            Summary {
                total_files: records.len(),
                ..Default::default()
            },
            |mut acc, record| {
                if let FileRecord::Success {
                    lines,
                    functions,
                    classes,
                    ..
                } = record
                {
                    acc.total_lines += lines;
                    acc.total_functions += functions;
                    acc.total_classes += classes;
                }
                acc
            },
        )
    }
}
