//! Integration tests for tree-sitter parser infrastructure.
//!
//! These tests validate structural counting against literal sources and the
//! testdata fixtures, going through the extension registry.

use std::path::PathBuf;

use pytally::analyze::file_stats;
use pytally::parser::{self, NodeCounts, Parser};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Initialize parsers and fetch the Python one.
fn python() -> Box<dyn Parser> {
    parser::init();
    parser::for_extension(".py").expect("Python parser should be available")
}

#[test]
fn test_single_function() {
    let counts = python().count(b"def f():\n    pass\n").unwrap();
    assert_eq!(
        counts,
        NodeCounts {
            functions: 1,
            classes: 0,
            imports: 0
        }
    );
}

#[test]
fn test_imports_class_and_method() {
    let source = b"import os\nimport sys\nclass A:\n    def m(self): pass\n";
    let counts = python().count(source).unwrap();
    assert_eq!(counts.functions, 1);
    assert_eq!(counts.classes, 1);
    assert_eq!(counts.imports, 2);
}

#[test]
fn test_syntax_error_message() {
    let err = python().count(b"def :").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_nested_class_with_inner_class_and_function() {
    let source = br#"
class Outer:
    class Inner:
        pass

    def method(self):
        pass
"#;
    let counts = python().count(source).unwrap();
    assert_eq!(counts.classes, 2);
    assert_eq!(counts.functions, 1);
}

#[test]
fn test_multiline_constructs() {
    let source = br#"
from collections import (
    OrderedDict,
    defaultdict,
)


def build(
    first,
    second=None,
):
    text = """
def not_a_function():
    pass
class NotAClass: pass
"""
    return text
"#;
    let counts = python().count(source).unwrap();
    assert_eq!(counts.imports, 1);
    assert_eq!(counts.functions, 1, "definitions inside strings are not counted");
    assert_eq!(counts.classes, 0);
}

#[test]
fn test_fixture_models() {
    let parser = python();
    let stats = file_stats(
        &testdata_path().join("project/pkg/models.py"),
        parser.as_ref(),
    )
    .unwrap();
    assert_eq!(stats.lines, 12);
    assert_eq!(stats.nodes.functions, 1);
    assert_eq!(stats.nodes.classes, 2);
    assert_eq!(stats.nodes.imports, 1);
}

#[test]
fn test_fixture_app() {
    let parser = python();
    let stats = file_stats(&testdata_path().join("project/app.py"), parser.as_ref()).unwrap();
    assert_eq!(stats.lines, 19);
    assert_eq!(stats.nodes.functions, 2);
    assert_eq!(stats.nodes.classes, 0);
    assert_eq!(stats.nodes.imports, 2);
}

#[test]
fn test_fixture_comments_only() {
    let parser = python();
    let stats = file_stats(
        &testdata_path().join("project/pkg/nested/comments.py"),
        parser.as_ref(),
    )
    .unwrap();
    assert_eq!(stats.lines, 3);
    assert_eq!(stats.nodes, NodeCounts::default());
}

#[test]
fn test_fixture_broken() {
    let parser = python();
    let result = file_stats(
        &testdata_path().join("project/pkg/broken.py"),
        parser.as_ref(),
    );
    assert!(result.is_err());
}
