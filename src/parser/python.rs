//! Python import extraction via AST traversal.
//!
//! Walks the whole tree, not just module-level statements, so imports
//! inside functions, classes and conditionals are found too:
//!   import os, a.b as c
//!   from ..pkg import x, y
//!   from . import *

use std::collections::VecDeque;
use std::path::Path;

use tree_sitter::{Node, Tree};

use crate::error::{ModgraphError, Result};
use crate::graph::types::{ImportStatement, ImportedName};

/// Imports and function names collected from one Python tree.
#[derive(Debug, Default)]
pub(crate) struct PythonItems {
    pub imports: Vec<ImportStatement>,
    pub functions: Vec<String>,
}

/// Fail with a parse error if the tree contains any ERROR or MISSING node,
/// or a Python 2 statement the grammar still accepts.
pub(crate) fn check_syntax(tree: &Tree, path: &Path, source: &[u8]) -> Result<()> {
    let root = tree.root_node();
    let bad = if root.has_error() {
        first_error_node(&root).unwrap_or(root)
    } else {
        match first_python2_statement(&root) {
            Some(node) => node,
            None => return Ok(()),
        }
    };

    let position = bad.start_position();
    let message = if bad.is_missing() {
        format!("missing `{}`", bad.kind())
    } else if is_python2_statement(bad.kind()) {
        format!("Python 2 `{}` is not valid Python 3", bad.kind())
    } else {
        let text = bad.utf8_text(source).unwrap_or_default();
        let snippet: String = text.lines().next().unwrap_or_default().chars().take(40).collect();
        format!("unexpected `{}`", snippet.trim())
    };

    Err(ModgraphError::Parse {
        path: path.to_path_buf(),
        line: position.row + 1,
        column: position.column + 1,
        message,
    })
}

/// Depth-first search for the earliest error node in source order.
fn first_error_node<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(&child) {
            return Some(found);
        }
    }
    None
}

fn is_python2_statement(kind: &str) -> bool {
    matches!(kind, "print_statement" | "exec_statement")
}

/// `print "x"` and `exec "code"` parse cleanly but are Python 2 only.
fn first_python2_statement<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if is_python2_statement(node.kind()) {
        return Some(*node);
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(found) = first_python2_statement(&child) {
            return Some(found);
        }
    }
    None
}

/// Collect imports and function definitions, breadth-first.
pub(crate) fn extract_python_items(root: &Node, source: &[u8]) -> PythonItems {
    let mut items = PythonItems::default();
    let mut queue: VecDeque<Node> = VecDeque::new();
    queue.push_back(*root);

    while let Some(node) = queue.pop_front() {
        match node.kind() {
            "import_statement" => extract_import(&node, source, &mut items.imports),
            "import_from_statement" => {
                if let Some(stmt) = extract_from_import(&node, source) {
                    items.imports.push(stmt);
                }
            }
            "future_import_statement" => {
                let names = imported_names(&node, source);
                items.imports.push(ImportStatement::from_import(
                    "__future__",
                    names,
                    0,
                    line_of(&node),
                ));
            }
            "function_definition" if !is_async(&node) => {
                if let Some(name) = node
                    .child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                {
                    items.functions.push(name.to_string());
                }
            }
            _ => {}
        }

        push_statement_children(&node, &mut queue);
    }

    items
}

/// Nodes that group statements without being statements themselves.
/// Python's own AST has no such layer, so they are flattened into their
/// parent's level.
fn is_suite_wrapper(kind: &str) -> bool {
    matches!(
        kind,
        "block" | "else_clause" | "finally_clause" | "decorated_definition"
    )
}

fn push_statement_children<'t>(node: &Node<'t>, queue: &mut VecDeque<Node<'t>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if is_suite_wrapper(child.kind()) {
            push_statement_children(&child, queue);
        } else {
            queue.push_back(child);
        }
    }
}

/// `async def` is a separate node type in Python's AST and is not counted.
fn is_async(node: &Node) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

/// `import a, b.c as d` yields one statement per listed module.
fn extract_import(node: &Node, source: &[u8], out: &mut Vec<ImportStatement>) {
    let line = line_of(node);
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        if let Some(target) = module_path(&name, source) {
            out.push(ImportStatement::import(target, line));
        }
    }
}

/// `from <module_name> import <names>`
fn extract_from_import(node: &Node, source: &[u8]) -> Option<ImportStatement> {
    let module = node.child_by_field_name("module_name")?;

    let (target, depth) = match module.kind() {
        "relative_import" => relative_parts(&module, source),
        _ => (dotted_text(&module, source), 0),
    };

    Some(ImportStatement::from_import(
        target,
        imported_names(node, source),
        depth,
        line_of(node),
    ))
}

/// Split a relative import into (dotted remainder, number of leading dots).
fn relative_parts(node: &Node, source: &[u8]) -> (String, usize) {
    let mut depth = 0;
    let mut target = String::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_prefix" => {
                depth = child
                    .utf8_text(source)
                    .map(|t| t.chars().filter(|&c| c == '.').count())
                    .unwrap_or(0);
            }
            "dotted_name" => target = dotted_text(&child, source),
            _ => {}
        }
    }

    (target, depth)
}

/// Names after `import` in a `from` statement, aliases dropped.
fn imported_names(node: &Node, source: &[u8]) -> Vec<ImportedName> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "wildcard_import" {
            names.push(ImportedName::Wildcard);
        }
    }

    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        if let Some(text) = module_path(&name, source) {
            names.push(ImportedName::Name(text));
        }
    }
    names
}

/// The dotted path of a `dotted_name` or the `name` field of an `aliased_import`.
fn module_path(node: &Node, source: &[u8]) -> Option<String> {
    let path = match node.kind() {
        "aliased_import" => node.child_by_field_name("name")?,
        _ => *node,
    };
    let text = dotted_text(&path, source);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Join the identifiers of a dotted name, ignoring any whitespace around the dots.
fn dotted_text(node: &Node, source: &[u8]) -> String {
    if node.kind() != "dotted_name" {
        return node
            .utf8_text(source)
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter_map(|part| part.utf8_text(source).ok())
        .collect::<Vec<_>>()
        .join(".")
}

fn line_of(node: &Node) -> usize {
    node.start_position().row + 1
}
