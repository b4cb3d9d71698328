//! Tree-sitter based parser implementation.
//!
//! This module provides a generic tree-sitter parser that can be configured
//! for different languages via a counting query.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser as TsParser, Query, QueryCursor, Tree};

use super::{NodeCounts, ParseError, Parser, Position};

/// Language rule run on every node of a clean tree.
///
/// Returns the offending node and a message when the language rejects
/// something the grammar accepted.
pub type NodeCheck = for<'t> fn(Node<'t>, &[u8]) -> Option<(Node<'t>, &'static str)>;

/// Configuration for a tree-sitter language parser.
///
/// The count query uses the capture names `function`, `class` and
/// `import`; any other capture is ignored.
#[derive(Clone)]
pub struct Config {
    /// The tree-sitter language
    pub language: Language,
    /// Language name (e.g., "python")
    pub language_name: &'static str,
    /// File extension including the dot (e.g., ".py")
    pub extension: &'static str,
    /// Tree-sitter query for counting structural nodes
    pub count_query: &'static str,
    /// Rules the grammar does not enforce
    pub check: Option<NodeCheck>,
}

/// Tree-sitter based parser.
pub struct TreeSitterParser {
    config: Config,
    /// Compiled once; a broken query fails every file with the same error.
    query: Result<Query, ParseError>,
}

impl TreeSitterParser {
    /// Create a new tree-sitter parser with the given configuration.
    pub fn new(config: Config) -> Self {
        let query = Query::new(&config.language, config.count_query)
            .map_err(|e| ParseError::Setup(e.to_string()));
        Self { config, query }
    }

    /// Parse source code and return a tree free of error nodes.
    fn parse(&self, source: &[u8]) -> Result<Tree, ParseError> {
        if source.contains(&0) {
            return Err(ParseError::NulByte);
        }

        let mut parser = TsParser::new();
        parser
            .set_language(&self.config.language)
            .map_err(|e| ParseError::Setup(e.to_string()))?;
        let tree = parser.parse(source, None).ok_or(ParseError::Aborted)?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(error_at(first_error(root).unwrap_or(root)));
        }

        if let Some(check) = self.config.check {
            if let Some(err) = first_rejection(root, source, check) {
                return Err(err);
            }
        }

        Ok(tree)
    }
}

impl Parser for TreeSitterParser {
    fn count(&self, source: &[u8]) -> Result<NodeCounts, ParseError> {
        let query = self.query.as_ref().map_err(Clone::clone)?;
        let tree = self.parse(source)?;
        let root = tree.root_node();

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, root, source);

        let mut counts = NodeCounts::default();

        while let Some(m) = matches.next() {
            for capture in m.captures {
                match query.capture_names()[capture.index as usize] {
                    "function" => counts.functions += 1,
                    "class" => counts.classes += 1,
                    "import" => counts.imports += 1,
                    _ => {}
                }
            }
        }

        Ok(counts)
    }

    fn language(&self) -> &str {
        self.config.language_name
    }

    fn extension(&self) -> &str {
        self.config.extension
    }
}

/// Run `check` over the whole tree and keep the earliest rejection.
///
/// A check on a block may flag one of its children, so the first hit in
/// visiting order is not always the first in the source.
fn first_rejection(root: Node, source: &[u8], check: NodeCheck) -> Option<ParseError> {
    let mut earliest: Option<Node> = None;
    let mut message = "";
    let mut cursor = root.walk();

    'walk: loop {
        if let Some((node, msg)) = check(cursor.node(), source) {
            if earliest.map_or(true, |e| node.start_byte() < e.start_byte()) {
                earliest = Some(node);
                message = msg;
            }
        }

        if cursor.goto_first_child() || cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                break 'walk;
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }

    earliest.map(|node| ParseError::Rejected {
        message: message.to_string(),
        at: position_of(node),
    })
}

/// Find the first ERROR or MISSING node in document order.
fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

fn error_at(node: Node) -> ParseError {
    let at = position_of(node);
    if node.is_missing() {
        ParseError::Missing {
            expected: node.kind().to_string(),
            at,
        }
    } else {
        ParseError::Syntax(at)
    }
}

fn position_of(node: Node) -> Position {
    let start = node.start_position();
    Position {
        line: start.row + 1, // tree-sitter is 0-indexed
        column: start.column + 1,
    }
}
