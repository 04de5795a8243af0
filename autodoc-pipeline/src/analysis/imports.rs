//! Import discovery over a Python syntax tree.
//!
//! tree-sitter's grammar also accepts Python 2 and some malformed blocks, so the tree is
//! checked against Python 3 rules before any import is read. Statements are then visited
//! level by level the way `ast.walk` nests them: a compound statement's body is one level
//! down, an `except` handler or `case` body two levels, and each `elif` one more than the
//! branch before it.

use std::collections::VecDeque;
use tree_sitter::{Node, Parser};

/// Names Python 3 reserves that the grammar still parses as identifiers.
const RESERVED_NAMES: [&str; 2] = ["async", "await"];

/// Every imported module or symbol in `source`, in breadth-first statement order.
///
/// - `import a.b as c` yields `a.b`
/// - `from m import x, y` yields `m.x`, `m.y`
/// - `from . import x` yields `.x` (relative dots are dropped, the module is empty)
/// - `from m import *` yields `m.*`
///
/// Source that is not valid Python 3 yields an empty list. Duplicates are kept.
pub fn extract_imports(source: &str) -> Vec<String> {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&tree_sitter_python::LANGUAGE.into()) {
        tracing::warn!(error = %e, "python grammar unavailable");
        return Vec::new();
    }
    let Some(tree) = parser.parse(source, None) else {
        return Vec::new();
    };

    let root = tree.root_node();
    let src = source.as_bytes();
    if root.has_error() {
        tracing::debug!("source has syntax errors; no imports extracted");
        return Vec::new();
    }
    if let Some(reason) = python3_violation(root, src) {
        tracing::debug!(reason, "source is not python 3; no imports extracted");
        return Vec::new();
    }

    let mut imports = Vec::new();
    let mut queue: VecDeque<Scope<'_>> = statements(root).into();

    while let Some(scope) = queue.pop_front() {
        if let Scope::Statement(node) = &scope {
            collect(*node, src, &mut imports);
        }
        queue.extend(scope.children());
    }

    imports
}

/// First construct in the tree that Python 3 rejects.
fn python3_violation(root: Node<'_>, src: &[u8]) -> Option<&'static str> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let violation = match node.kind() {
            "print_statement" | "exec_statement" | "chevron" => Some("python 2 statement"),
            "<>" => Some("python 2 operator"),
            "except_clause" if has_token(node, ",") => Some("python 2 except syntax"),
            "identifier" => node
                .utf8_text(src)
                .ok()
                .filter(|name| RESERVED_NAMES.contains(name))
                .map(|_| "reserved word used as a name"),
            "integer" => node
                .utf8_text(src)
                .ok()
                .filter(|digits| is_legacy_integer(digits))
                .map(|_| "python 2 integer literal"),
            "block" if statements(node).is_empty() => Some("block has no statements"),
            _ => None,
        };
        if violation.is_some() {
            return violation;
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }
    None
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| !c.is_named() && c.kind() == token)
}

/// `10L` or a zero-prefixed octal such as `0777`. Imaginary literals may keep leading zeros.
fn is_legacy_integer(digits: &str) -> bool {
    if digits.ends_with(['l', 'L']) {
        return true;
    }
    if digits.ends_with(['j', 'J']) {
        return false;
    }
    let mut chars = digits.chars();
    chars.next() == Some('0')
        && chars.next().is_some_and(|c| c.is_ascii_digit() || c == '_')
        && digits.chars().any(|c| matches!(c, '1'..='9'))
}

/// A node of the statement tree as `ast` shapes it.
enum Scope<'t> {
    Statement(Node<'t>),
    /// An `elif` followed by the rest of its chain; `ast` nests each one inside the last.
    Elif(Vec<Node<'t>>),
    /// An `except` handler or `case`, which sits between its statement and its body.
    Clause(Node<'t>),
}

impl<'t> Scope<'t> {
    fn children(&self) -> Vec<Scope<'t>> {
        match self {
            Scope::Statement(node) => statement_children(*node),
            Scope::Elif(chain) => match chain.split_first() {
                Some((first, rest)) => {
                    let mut out = body(*first);
                    out.extend(or_else(rest.to_vec()));
                    out
                }
                None => Vec::new(),
            },
            Scope::Clause(node) => body(*node),
        }
    }
}

fn statement_children(node: Node<'_>) -> Vec<Scope<'_>> {
    match node.kind() {
        "if_statement" => {
            let mut out = body(node);
            out.extend(or_else(named_of(node, &["elif_clause", "else_clause"])));
            out
        }
        "for_statement" | "while_statement" => {
            let mut out = body(node);
            for clause in named_of(node, &["else_clause"]) {
                out.extend(body(clause));
            }
            out
        }
        "try_statement" => {
            let mut out = body(node);
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "except_clause" | "except_group_clause" => out.push(Scope::Clause(child)),
                    "else_clause" | "finally_clause" => out.extend(body(child)),
                    _ => {}
                }
            }
            out
        }
        "match_statement" => block_of(node)
            .map(|cases| named_of(cases, &["case_clause"]).into_iter().map(Scope::Clause).collect())
            .unwrap_or_default(),
        "function_definition" | "class_definition" | "with_statement" => body(node),
        _ => Vec::new(),
    }
}

fn or_else(alternatives: Vec<Node<'_>>) -> Vec<Scope<'_>> {
    match alternatives.first() {
        None => Vec::new(),
        Some(clause) if clause.kind() == "else_clause" => body(*clause),
        Some(_) => vec![Scope::Elif(alternatives)],
    }
}

fn block_of(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|c| c.kind() == "block")
}

fn body(node: Node<'_>) -> Vec<Scope<'_>> {
    block_of(node).map(statements).unwrap_or_default()
}

fn named_of<'t>(node: Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).filter(|c| kinds.contains(&c.kind())).collect()
}

/// Statements directly inside a module or block. Decorators belong to their definition.
fn statements(node: Node<'_>) -> Vec<Scope<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .map(|c| {
            if c.kind() == "decorated_definition" {
                Scope::Statement(c.child_by_field_name("definition").unwrap_or(c))
            } else {
                Scope::Statement(c)
            }
        })
        .collect()
}

fn collect(node: Node<'_>, src: &[u8], out: &mut Vec<String>) {
    match node.kind() {
        "import_statement" => collect_import(node, src, out),
        "import_from_statement" => {
            let module = node
                .child_by_field_name("module_name")
                .map(|m| module_text(m, src))
                .unwrap_or_default();
            collect_from_import(node, &module, src, out);
        }
        "future_import_statement" => collect_from_import(node, "__future__", src, out),
        _ => {}
    }
}

fn collect_import(node: Node<'_>, src: &[u8], out: &mut Vec<String>) {
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        out.push(imported_name(name, src));
    }
}

fn collect_from_import(node: Node<'_>, module: &str, src: &[u8], out: &mut Vec<String>) {
    let mut cursor = node.walk();
    let names: Vec<Node<'_>> = node.children_by_field_name("name", &mut cursor).collect();
    if names.is_empty() {
        let mut cursor = node.walk();
        if node.named_children(&mut cursor).any(|c| c.kind() == "wildcard_import") {
            out.push(format!("{}.*", module));
        }
        return;
    }
    for name in names {
        out.push(format!("{}.{}", module, imported_name(name, src)));
    }
}

/// Name as written before any `as` alias.
fn imported_name(node: Node<'_>, src: &[u8]) -> String {
    if node.kind() == "aliased_import" {
        return node.child_by_field_name("name").map(|n| dotted_text(n, src)).unwrap_or_default();
    }
    dotted_text(node, src)
}

/// Module of a from-import; relative prefixes contribute nothing.
fn module_text(node: Node<'_>, src: &[u8]) -> String {
    if node.kind() == "relative_import" {
        let mut cursor = node.walk();
        return node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "dotted_name")
            .map(|n| dotted_text(n, src))
            .unwrap_or_default();
    }
    dotted_text(node, src)
}

/// `a . b` and `a.b` both normalize to `a.b`.
fn dotted_text(node: Node<'_>, src: &[u8]) -> String {
    if node.kind() != "dotted_name" {
        return node.utf8_text(src).unwrap_or_default().to_string();
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() == "identifier")
        .filter_map(|c| c.utf8_text(src).ok())
        .collect::<Vec<_>>()
        .join(".")
}
