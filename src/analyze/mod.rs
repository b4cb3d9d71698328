//! Per-file analysis and aggregation.

mod file;
mod runner;
mod types;

pub use file::{analyze_file, count_lines, file_stats, AnalyzeError, FileStats};
pub use runner::Runner;
pub use types::{FileRecord, Summary};
