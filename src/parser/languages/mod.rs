//! Language-specific tree-sitter configurations.
//!
//! Each language module provides:
//! - A counting query for function, class and import nodes
//! - Constructs the grammar accepts but the language rejects
//! - Factory function for creating parsers

pub mod python;

/// Register all available language parsers.
pub fn register_all() {
    python::register();
}
