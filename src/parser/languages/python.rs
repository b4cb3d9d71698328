//! Python language configuration for tree-sitter parsing.

use tree_sitter::Node;

use crate::parser::treesitter::{Config, TreeSitterParser};
use crate::parser::Parser;

/// Tree-sitter query for counting Python structure.
///
/// Captures:
/// - `function`: every `def`, including `async def`, methods and nested functions
/// - `class`: every class definition, including nested classes
/// - `import`: `import x`, `from x import y` and `from __future__ import y`
const COUNT_QUERY: &str = r#"
(function_definition) @function
(class_definition) @class
(import_statement) @import
(import_from_statement) @import
(future_import_statement) @import
"#;

const LEADING_ZEROS: &str =
    "leading zeros in decimal integer literals are not permitted; use an 0o prefix for octal integers";

/// Create a new Python parser.
pub fn new_parser() -> Box<dyn Parser> {
    Box::new(TreeSitterParser::new(Config {
        language: tree_sitter_python::LANGUAGE.into(),
        language_name: "python",
        extension: ".py",
        count_query: COUNT_QUERY,
        check: Some(check_node),
    }))
}

/// Register Python parser for .py extension.
pub fn register() {
    crate::parser::register(".py", new_parser);
}

/// Python 3 rules the grammar leaves open.
///
/// tree-sitter-python still parses several Python 2 forms and only tracks
/// indentation where a block is expected, so both are checked here.
fn check_node<'t>(node: Node<'t>, source: &[u8]) -> Option<(Node<'t>, &'static str)> {
    match node.kind() {
        // `print >>f, x` is a shift expression in Python 3
        "print_statement" if !has_child(node, "chevron") => {
            Some((node, "Missing parentheses in call to 'print'"))
        }
        "exec_statement" => Some((node, "Missing parentheses in call to 'exec'")),
        "<>" => Some((node, "invalid syntax")),
        // Backtick repr is lexed as a string
        "string_start" if text(node, source).ends_with('`') => Some((node, "invalid syntax")),
        "integer" => integer_error(text(node, source)).map(|msg| (node, msg)),
        "module" => misindented(node, source, Some(b"")),
        "block" => empty_block(node).or_else(|| misindented(node, source, None)),
        _ => None,
    }
}

fn has_child(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

fn text<'s>(node: Node, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or_default()
}

fn integer_error(literal: &str) -> Option<&'static str> {
    let lower = literal.to_ascii_lowercase();
    let radix = ["0x", "0o", "0b"].iter().position(|p| lower.starts_with(p));

    if lower.ends_with('l') {
        return Some(match radix {
            Some(0) => "invalid hexadecimal literal",
            Some(1) => "invalid octal literal",
            Some(2) => "invalid binary literal",
            _ => "invalid decimal literal",
        });
    }

    let octal_style = radix.is_none()
        && !lower.ends_with('j')
        && lower.starts_with('0')
        && lower.bytes().any(|b| matches!(b, b'1'..=b'9'));
    octal_style.then_some(LEADING_ZEROS)
}

/// `if x:` followed by a line at the same level parses as an empty block.
fn empty_block<'t>(block: Node<'t>) -> Option<(Node<'t>, &'static str)> {
    let mut cursor = block.walk();
    let has_statement = block
        .named_children(&mut cursor)
        .any(|c| c.kind() != "comment");
    (!has_statement).then_some((block, "expected an indented block"))
}

/// Check that every statement starting a line in `container` shares one
/// indentation. `fixed` pins it; otherwise the first statement sets it.
/// Prefixes are compared byte for byte, so mixing tabs and spaces between
/// lines of one block is rejected.
fn misindented<'t>(
    container: Node<'t>,
    source: &[u8],
    fixed: Option<&[u8]>,
) -> Option<(Node<'t>, &'static str)> {
    let mut expected = fixed;
    let mut previous: Option<Node<'t>> = None;
    let mut cursor = container.walk();

    for child in container.named_children(&mut cursor) {
        if child.kind() == "comment" {
            continue;
        }
        if let Some(indent) = line_indent(child, source) {
            match expected {
                None => expected = Some(indent),
                Some(want) if want == indent => {}
                Some(want) => {
                    let after_compound =
                        previous.is_some_and(|p| p.end_position().row > p.start_position().row);
                    let msg = if indent.len() > want.len() && !after_compound {
                        "unexpected indent"
                    } else {
                        "unindent does not match any outer indentation level"
                    };
                    return Some((child, msg));
                }
            }
        }
        previous = Some(child);
    }
    None
}

/// Leading whitespace of the line `node` starts, or `None` when something
/// else precedes it on that line. A form feed resets the indentation.
fn line_indent<'s>(node: Node, source: &'s [u8]) -> Option<&'s [u8]> {
    let start = node.start_byte();
    let line_start = source[..start]
        .iter()
        .rposition(|&b| b == b'\n' || b == b'\r')
        .map_or(0, |i| i + 1);
    let prefix = &source[line_start..start];

    if !prefix.iter().all(|b| matches!(b, b' ' | b'\t' | b'\x0c')) {
        return None;
    }
    let indent_start = prefix
        .iter()
        .rposition(|&b| b == b'\x0c')
        .map_or(0, |i| i + 1);
    Some(&prefix[indent_start..])
}
