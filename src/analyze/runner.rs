//! Analysis runner that applies the file analyzer to every discovered path.

use std::path::{Path, PathBuf};

use crate::parser::Parser;

use super::{analyze_file, FileRecord};

/// Analyzes a sequence of files one at a time, in order.
pub struct Runner<'p> {
    parser: &'p dyn Parser,
}

impl<'p> Runner<'p> {
    /// Create a new runner backed by `parser`.
    pub fn new(parser: &'p dyn Parser) -> Self {
        Self { parser }
    }

    /// Analyze every file, calling `on_file` just before each one.
    ///
    /// Records come back in the same order as `files`. Per-file failures
    /// are recorded and never stop the run.
    pub fn run<F>(&self, files: &[PathBuf], mut on_file: F) -> Vec<FileRecord>
    where
        F: FnMut(&Path),
    {
        files
            .iter()
            .map(|path| {
                on_file(path);
                analyze_file(path, self.parser)
            })
            .collect()
    }
}
