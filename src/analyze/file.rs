//! Per-file analysis: read, decode, parse and count.

use std::path::Path;

use thiserror::Error;

use crate::parser::{NodeCounts, ParseError, Parser};

use super::FileRecord;

/// Reasons a single file could not be analyzed.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("{0}")]
    Read(#[from] std::io::Error),
    #[error("invalid utf-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Line and node counts for a successfully parsed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    pub lines: usize,
    pub nodes: NodeCounts,
}

/// Analyze one file, folding any failure into a `FileRecord::Failure`.
pub fn analyze_file(path: &Path, parser: &dyn Parser) -> FileRecord {
    let file_path = path.to_string_lossy().to_string();

    match file_stats(path, parser) {
        Ok(stats) => {
            tracing::debug!(
                path = %file_path,
                lines = stats.lines,
                functions = stats.nodes.functions,
                classes = stats.nodes.classes,
                imports = stats.nodes.imports,
                "analyzed file"
            );
            FileRecord::Success {
                file_path,
                lines: stats.lines,
                functions: stats.nodes.functions,
                classes: stats.nodes.classes,
                imports: stats.nodes.imports,
            }
        }
        Err(e) => {
            tracing::warn!(path = %file_path, error = %e, "file analysis failed");
            FileRecord::Failure {
                file_path,
                error: e.to_string(),
            }
        }
    }
}

/// Read and parse one file.
///
/// The file is read whole, so its handle is closed before parsing starts.
pub fn file_stats(path: &Path, parser: &dyn Parser) -> Result<FileStats, AnalyzeError> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8(bytes)?;
    let nodes = parser.count(content.as_bytes())?;

    Ok(FileStats {
        lines: count_lines(&content),
        nodes,
    })
}

/// Count line-terminated segments the way universal newline splitting does.
///
/// `\r\n` is one terminator. A trailing segment without a terminator counts
/// once and the empty string has no lines.
pub fn count_lines(text: &str) -> usize {
    let mut lines = 0;
    let mut pending = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines += 1;
                pending = false;
            }
            '\n' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}'
            | '\u{2029}' => {
                lines += 1;
                pending = false;
            }
            _ => pending = true,
        }
    }

    if pending {
        lines += 1;
    }
    lines
}
