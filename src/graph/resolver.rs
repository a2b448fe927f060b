//! Import resolution: raw statements to dependency edges.
//!
//! Edges are fully qualified per imported symbol:
//!   from pkg import a, b  ->  pkg.a, pkg.b
//!   from ..up import *    ->  ..up.*
//!   from . import e       ->  .e
//!   from . import *       ->  ..*
//!   import os.path        ->  os.path
//!
//! Coupling counts depend on this granularity, so there is a single mode.

use tracing::warn;

use super::types::{DependencyEdge, ImportKind, ImportStatement, ImportedName};

/// Resolve a module's statements into its ordered dependency edges.
pub fn resolve_imports(statements: &[ImportStatement]) -> Vec<DependencyEdge> {
    let mut edges = Vec::with_capacity(statements.len());

    for stmt in statements {
        for edge in resolve_statement(stmt) {
            if edge.is_empty() {
                warn!(line = stmt.line, kind = %stmt.kind, "import resolved to an empty edge, skipping");
                continue;
            }
            edges.push(DependencyEdge::new(edge));
        }
    }

    edges
}

fn resolve_statement(stmt: &ImportStatement) -> Vec<String> {
    match stmt.kind {
        ImportKind::Import => vec![stmt.target.clone()],
        ImportKind::From => {
            let base = format!("{}{}", ".".repeat(stmt.relative_depth), stmt.target);
            if stmt.names.is_empty() {
                return vec![base];
            }
            stmt.names
                .iter()
                .map(|name| qualify(&base, &stmt.target, name))
                .collect()
        }
    }
}

/// `{dots}{target}.{name}`, dropping `target.` for a named symbol when the
/// target is empty. Wildcards always keep the separator.
fn qualify(base: &str, target: &str, name: &ImportedName) -> String {
    let name = match name {
        ImportedName::Name(n) => n.as_str(),
        ImportedName::Wildcard => return format!("{}.*", base),
    };
    if target.is_empty() {
        format!("{}{}", base, name)
    } else {
        format!("{}.{}", base, name)
    }
}
