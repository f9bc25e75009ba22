//! Tree-sitter based Python parsing for syntax checking

use std::cell::RefCell;
use tree_sitter::{Node, Parser, Tree};

// Tree-sitter parsers are expensive to create but reusable, so each thread
// keeps one pre-configured Python parser.
thread_local! {
    static PYTHON_PARSER: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        // Ignore error here - will be caught at parse time if language fails
        let _ = p.set_language(&tree_sitter_python::LANGUAGE.into());
        p
    });
}

/// Parse content with the thread-local Python parser. `None` means the parser
/// itself was unusable, not that the code has a syntax error.
pub fn parse_python(code: &str) -> Option<Tree> {
    PYTHON_PARSER.with(|p| p.borrow_mut().parse(code, None))
}

/// Whether `code` parses without syntax errors.
pub fn is_valid_python(code: &str) -> bool {
    parse_python(code)
        .map(|tree| first_fault_line(&tree).is_none())
        .unwrap_or(false)
}

/// 1-based line of the first syntax fault in the tree, if any.
///
/// Two fault sources: error/missing nodes flagged by the grammar, and
/// compound-statement headers whose suite never materialized. Tree-sitter
/// accepts `def f():` with nothing indented under it, which CPython rejects
/// with "expected an indented block"; without the second check such code
/// would skip repair and fail much later inside the renderer.
pub fn first_fault_line(tree: &Tree) -> Option<usize> {
    let root = tree.root_node();
    if root.has_error() {
        return Some(first_fault_node(root).start_position().row + 1);
    }
    first_missing_body(root).map(|header| header.start_position().row + 1)
}

/// Field that holds the indented suite of a compound statement.
fn body_field(kind: &str) -> Option<&'static str> {
    match kind {
        "function_definition" | "class_definition" | "for_statement" | "while_statement"
        | "with_statement" | "else_clause" => Some("body"),
        "if_statement" | "elif_clause" => Some("consequence"),
        _ => None,
    }
}

/// First compound-statement header whose body is absent or empty.
fn first_missing_body(node: Node<'_>) -> Option<Node<'_>> {
    if let Some(field) = body_field(node.kind()) {
        match node.child_by_field_name(field) {
            Some(body) if body.named_child_count() > 0 => {}
            _ => return Some(node),
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_missing_body(child) {
            return Some(found);
        }
    }
    None
}

/// Depth-first search for the earliest error or missing node. The caller has
/// already established that `node` contains an error somewhere.
fn first_fault_node(node: Node<'_>) -> Node<'_> {
    if node.is_error() || node.is_missing() {
        return node;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.is_error() || child.is_missing() || child.has_error() {
            return first_fault_node(child);
        }
    }
    // has_error with no erroneous child: the fault is the node itself
    node
}

/// Source text of a node, empty on a byte-range mismatch.
pub(crate) fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_code_has_no_fault() {
        let code = "from manim import *\n\nclass Intro(Scene):\n    def construct(self):\n        self.play(Create(Circle()))\n";
        let tree = parse_python(code).unwrap();
        assert_eq!(first_fault_line(&tree), None);
        assert!(is_valid_python(code));
    }

    #[test]
    fn empty_input_is_valid() {
        assert!(is_valid_python(""));
    }

    #[test]
    fn garbage_line_is_located() {
        let code = "def f():\n    return 1\n\nthis is ! not python";
        let tree = parse_python(code).unwrap();
        let line = first_fault_line(&tree).unwrap();
        assert_eq!(line, 4);
    }

    #[test]
    fn single_bad_line_reports_line_one() {
        let code = "def f(:";
        let tree = parse_python(code).unwrap();
        assert_eq!(first_fault_line(&tree), Some(1));
    }

    #[test]
    fn header_without_body_is_a_fault() {
        for code in ["def f():\n", "if True:\n", "class A(Scene):\n"] {
            let tree = parse_python(code).unwrap();
            assert_eq!(first_fault_line(&tree), Some(1), "input: {code:?}");
            assert!(!is_valid_python(code), "input: {code:?}");
        }
    }

    #[test]
    fn unindented_body_is_a_fault_at_the_header() {
        let code = "def f():\nx = 1\n";
        let tree = parse_python(code).unwrap();
        assert_eq!(first_fault_line(&tree), Some(1));
    }

    #[test]
    fn nested_missing_body_is_located() {
        let code = "def f():\n    if True:\n";
        let tree = parse_python(code).unwrap();
        assert_eq!(first_fault_line(&tree), Some(2));
    }

    #[test]
    fn fault_between_valid_lines_is_located() {
        let code = "x = 1\nb = = 2\nz = 3\n";
        let tree = parse_python(code).unwrap();
        assert_eq!(first_fault_line(&tree), Some(2));
    }
}
