//! pytally - structural statistics for Python source trees.
//!
//! pytally walks a directory, parses every Python file with tree-sitter and
//! counts lines, function definitions, class definitions and import
//! statements. Files that cannot be read or parsed are recorded with their
//! error instead of stopping the run.
//!
//! # Architecture
//!
//! - `discover`: Recursive source file discovery
//! - `parser`: Tree-sitter parsers that count structural nodes
//! - `analyze`: Per-file analysis, the runner, and aggregation
//! - `report`: Output formatting (text, JSON)
//! - `config`: YAML config file schema
//! - `cli`: Command-line entry and the end-to-end pipeline
//!
//! # Adding a New Language
//!
//! See `src/parser/languages/python.rs`. Provide a counting query and
//! register the parser in `languages/mod.rs`.

pub mod analyze;
pub mod cli;
pub mod config;
pub mod discover;
pub mod parser;
pub mod report;

pub use analyze::{analyze_file, FileRecord, Runner, Summary};
pub use config::Config;
pub use discover::{collect_files, DiscoverError};
pub use parser::{for_extension, init as init_parsers, NodeCounts, ParseError, Parser};
pub use report::Report;

/// Initialize all subsystems.
///
/// Call this once at startup.
pub fn init() {
    init_parsers();
}
