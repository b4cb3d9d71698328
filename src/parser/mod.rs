//! Language-agnostic parsing interface for structural node counting.
//!
//! This module provides:
//! - `Parser` trait: Abstract interface for language parsers
//! - Registry: Factory-based parser lookup by file extension
//! - Tree-sitter implementations for the supported languages

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use thiserror::Error;

pub mod languages;
pub mod treesitter;

/// Structural counts extracted from one parsed source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeCounts {
    /// Named function definitions, nested ones included.
    pub functions: usize,
    /// Class definitions, nested ones included.
    pub classes: usize,
    /// Import statements, one per statement regardless of imported names.
    pub imports: usize,
}

/// 1-indexed source position used in parse error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Reasons a source file could not be turned into a usable syntax tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid syntax ({0})")]
    Syntax(Position),
    #[error("expected '{expected}' ({at})")]
    Missing { expected: String, at: Position },
    /// Parsed by the grammar but not accepted by the language itself.
    #[error("{message} ({at})")]
    Rejected { message: String, at: Position },
    #[error("source code cannot contain null bytes")]
    NulByte,
    #[error("parser setup failed: {0}")]
    Setup(String),
    #[error("failed to parse source")]
    Aborted,
}

/// Parser trait for counting structural nodes in source code.
pub trait Parser: Send + Sync {
    /// Parse `source` and count function, class and import nodes.
    ///
    /// A source that does not parse cleanly is an error; partial counts
    /// are never returned.
    fn count(&self, source: &[u8]) -> Result<NodeCounts, ParseError>;

    /// Return the language this parser handles (e.g., "python").
    fn language(&self) -> &str;

    /// Return the file extension this parser handles, including the dot.
    fn extension(&self) -> &str;
}

/// Factory function type for creating parser instances.
pub type ParserFactory = fn() -> Box<dyn Parser>;

lazy_static::lazy_static! {
    /// Global parser registry mapping file extensions to parser factories.
    static ref REGISTRY: RwLock<HashMap<String, ParserFactory>> = RwLock::new(HashMap::new());
}

/// Register a parser factory for a file extension.
/// Extension should include the dot (e.g., ".py").
pub fn register(ext: &str, factory: ParserFactory) {
    let mut registry = REGISTRY.write().unwrap();
    registry.insert(ext.to_string(), factory);
}

/// Get a parser for the given file extension.
/// Returns None if no parser is registered for the extension.
pub fn for_extension(ext: &str) -> Option<Box<dyn Parser>> {
    let registry = REGISTRY.read().unwrap();
    registry.get(ext).map(|factory| factory())
}

/// Initialize the parser registry with all available language parsers.
/// Call this once at startup before using parsers.
pub fn init() {
    languages::register_all();
}
