//! Declaration extraction for Go sources.
//!
//! Parses a file with tree-sitter, classifies its top-level declarations and
//! reduces them to a textual structural projection: one `import "<path>"`
//! line per import, one `var <names> <type>` line per variable spec, and one
//! `func <name>(params) (results) { }` block per free function. Bodies are
//! never emitted.

use camino::Utf8Path;
use tracing::{trace, warn};
use tree_sitter::{Node, Parser, Tree};

use crate::error::{CodecombError, Result};
use crate::extract::{ExtractionRequest, Language, LanguageBackend};
use crate::summary::CommentProvider;

pub struct GoBackend;

impl LanguageBackend for GoBackend {
    fn language(&self) -> Language {
        Language::Go
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn extract(
        &self,
        path: &Utf8Path,
        source: &str,
        request: &ExtractionRequest,
        commenter: Option<&dyn CommentProvider>,
    ) -> Result<String> {
        if !request.any() {
            return Ok(String::new());
        }

        let tree = parse_source(path, source)?;
        let decls = classify(tree.root_node());

        // The summary capability is only consulted when comments were asked
        // for; otherwise it must never be invoked.
        let commenter = if request.comments { commenter } else { None };

        let mut out = String::new();
        if request.imports {
            collect_imports(&decls, source, &mut out);
        }
        if request.globals {
            collect_globals(&decls, source, &mut out);
        }
        if request.functions {
            collect_functions(&decls, source, commenter, &mut out);
        }

        Ok(out)
    }
}

fn parse_source(path: &Utf8Path, source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::language())
        .map_err(|err| CodecombError::Parse {
            path: path.to_string(),
            message: err.to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| CodecombError::Parse {
            path: path.to_string(),
            message: "parser produced no tree".to_string(),
        })?;

    if tree.root_node().has_error() {
        return Err(CodecombError::Parse {
            path: path.to_string(),
            message: first_syntax_error(tree.root_node()),
        });
    }

    Ok(tree)
}

fn first_syntax_error(node: Node<'_>) -> String {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return format!("syntax error at line {}, column {}", pos.row + 1, pos.column + 1);
    }
    if node.has_error() {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.has_error() || child.is_missing() {
                return first_syntax_error(child);
            }
        }
    }
    "syntax error".to_string()
}

/// A classified top-level declaration.
///
/// The set is closed on purpose: a new declaration kind in the grammar has to
/// be mapped here explicitly before any classifier can see it.
enum TopLevelDecl<'tree> {
    Import(Node<'tree>),
    Var(Node<'tree>),
    Const,
    TypeDef,
    Function(Node<'tree>),
    Method,
    Package,
    Other,
}

fn classify(root: Node<'_>) -> Vec<TopLevelDecl<'_>> {
    let mut cursor = root.walk();
    root.named_children(&mut cursor)
        .map(|node| match node.kind() {
            "import_declaration" => TopLevelDecl::Import(node),
            "var_declaration" => TopLevelDecl::Var(node),
            "const_declaration" => TopLevelDecl::Const,
            "type_declaration" => TopLevelDecl::TypeDef,
            "function_declaration" => TopLevelDecl::Function(node),
            "method_declaration" => TopLevelDecl::Method,
            "package_clause" => TopLevelDecl::Package,
            _ => TopLevelDecl::Other,
        })
        .collect()
}

fn collect_imports(decls: &[TopLevelDecl<'_>], source: &str, out: &mut String) {
    for decl in decls {
        let TopLevelDecl::Import(node) = decl else {
            continue;
        };

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => push_import(child, source, out),
                "import_spec_list" => {
                    let mut inner = child.walk();
                    for spec in child.named_children(&mut inner) {
                        if spec.kind() == "import_spec" {
                            push_import(spec, source, out);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

fn push_import(spec: Node<'_>, source: &str, out: &mut String) {
    // The path literal keeps its quotes, so the line reads `import "fmt"`.
    if let Some(path) = spec.child_by_field_name("path") {
        out.push_str("import ");
        out.push_str(node_text(path, source));
        out.push('\n');
    }
}

fn collect_globals(decls: &[TopLevelDecl<'_>], source: &str, out: &mut String) {
    for decl in decls {
        // Constants and type declarations are deliberately not globals.
        let TopLevelDecl::Var(node) = decl else {
            continue;
        };

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "var_spec" => push_var_spec(child, source, out),
                "var_spec_list" => {
                    let mut inner = child.walk();
                    for spec in child.named_children(&mut inner) {
                        if spec.kind() == "var_spec" {
                            push_var_spec(spec, source, out);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

fn push_var_spec(spec: Node<'_>, source: &str, out: &mut String) {
    out.push_str("var");

    let mut cursor = spec.walk();
    for name in spec.children_by_field_name("name", &mut cursor) {
        out.push(' ');
        out.push_str(node_text(name, source));
    }

    // `var x = expr` has no declared type; the names stand alone.
    if let Some(ty) = spec.child_by_field_name("type") {
        out.push(' ');
        out.push_str(&render_type(ty, source));
    }

    out.push('\n');
}

fn collect_functions(
    decls: &[TopLevelDecl<'_>],
    source: &str,
    commenter: Option<&dyn CommentProvider>,
    out: &mut String,
) {
    for decl in decls {
        // Methods carry a receiver and are a different category; only free
        // functions are extracted here.
        let TopLevelDecl::Function(node) = decl else {
            continue;
        };

        let Some(name) = node.child_by_field_name("name") else {
            continue;
        };
        let name = node_text(name, source);
        let params = format_params(node.child_by_field_name("parameters"), source);
        let results = format_results(node.child_by_field_name("result"), source);

        out.push_str("func ");
        out.push_str(name);
        out.push_str(&params);
        out.push_str(&results);
        out.push_str(" {\n");

        if let Some(commenter) = commenter {
            match commenter.describe(&format!("{name}{params}")) {
                Ok(comment) => {
                    out.push_str("// ");
                    out.push_str(&comment);
                    out.push('\n');
                }
                Err(err) => {
                    // Best effort: the function block stands without a comment.
                    warn!(function = name, error = %err, "comment generation failed");
                }
            }
        }

        out.push_str("}\n");
    }
}

/// Formats a parameter list as `(a, b int, c string)`.
///
/// Total by construction: a missing list renders as `()`.
fn format_params(params: Option<Node<'_>>, source: &str) -> String {
    let mut buf = String::from("(");

    if let Some(params) = params {
        let mut first = true;
        let mut cursor = params.walk();
        for group in params.named_children(&mut cursor) {
            let rendered = match group.kind() {
                "parameter_declaration" => format_param_group(group, source),
                "variadic_parameter_declaration" => format_variadic_group(group, source),
                _ => continue,
            };
            if !first {
                buf.push_str(", ");
            }
            buf.push_str(&rendered);
            first = false;
        }
    }

    buf.push(')');
    buf
}

fn format_param_group(group: Node<'_>, source: &str) -> String {
    let mut names = Vec::new();
    let mut cursor = group.walk();
    for name in group.children_by_field_name("name", &mut cursor) {
        names.push(node_text(name, source));
    }

    let ty = group
        .child_by_field_name("type")
        .map(|ty| render_type(ty, source))
        .unwrap_or_default();

    if names.is_empty() {
        ty
    } else {
        format!("{} {}", names.join(", "), ty)
    }
}

fn format_variadic_group(group: Node<'_>, source: &str) -> String {
    let ty = group
        .child_by_field_name("type")
        .map(|ty| render_type(ty, source))
        .unwrap_or_default();

    match group.child_by_field_name("name") {
        Some(name) => format!("{} ...{}", node_text(name, source), ty),
        None => format!("...{}", ty),
    }
}

/// Formats a result list as ` (T)` or ` (T1, T2)`.
///
/// No results yields an empty string; a single unnamed result is still
/// parenthesized for consistency with the multi-result form. Named results
/// render type-only.
fn format_results(result: Option<Node<'_>>, source: &str) -> String {
    let Some(result) = result else {
        return String::new();
    };

    if result.kind() != "parameter_list" {
        return format!(" ({})", render_type(result, source));
    }

    let mut types = Vec::new();
    let mut cursor = result.walk();
    for group in result.named_children(&mut cursor) {
        let ty = match group.kind() {
            "parameter_declaration" => group
                .child_by_field_name("type")
                .map(|ty| render_type(ty, source)),
            "variadic_parameter_declaration" => group
                .child_by_field_name("type")
                .map(|ty| format!("...{}", render_type(ty, source))),
            _ => None,
        };
        if let Some(ty) = ty {
            types.push(ty);
        }
    }

    format!(" ({})", types.join(", "))
}

/// Renders a type expression back to its canonical source form.
///
/// Composite markers are rebuilt recursively; anything the renderer does not
/// recognize falls back to the node's verbatim source slice, so the worst
/// case is an odd-looking but faithful render, never a failure.
fn render_type(node: Node<'_>, source: &str) -> String {
    match node.kind() {
        "pointer_type" => match node.named_child(0) {
            Some(inner) => format!("*{}", render_type(inner, source)),
            None => node_text(node, source).to_string(),
        },
        "slice_type" => match node.child_by_field_name("element") {
            Some(element) => format!("[]{}", render_type(element, source)),
            None => node_text(node, source).to_string(),
        },
        "array_type" => {
            let length = node
                .child_by_field_name("length")
                .map(|length| node_text(length, source))
                .unwrap_or_default();
            match node.child_by_field_name("element") {
                Some(element) => format!("[{}]{}", length, render_type(element, source)),
                None => node_text(node, source).to_string(),
            }
        }
        "map_type" => {
            match (
                node.child_by_field_name("key"),
                node.child_by_field_name("value"),
            ) {
                (Some(key), Some(value)) => format!(
                    "map[{}]{}",
                    render_type(key, source),
                    render_type(value, source)
                ),
                _ => node_text(node, source).to_string(),
            }
        }
        "channel_type" => render_channel(node, source),
        "parenthesized_type" => match node.named_child(0) {
            Some(inner) => format!("({})", render_type(inner, source)),
            None => node_text(node, source).to_string(),
        },
        "qualified_type" => {
            match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(package), Some(name)) => {
                    format!("{}.{}", node_text(package, source), node_text(name, source))
                }
                _ => node_text(node, source).to_string(),
            }
        }
        "function_type" => {
            let params = format_params(node.child_by_field_name("parameters"), source);
            let results = format_results(node.child_by_field_name("result"), source);
            format!("func{params}{results}")
        }
        "type_identifier" | "package_identifier" | "identifier" => {
            node_text(node, source).to_string()
        }
        // Inline structs, interfaces, generics and anything newer than this
        // renderer: the source slice is the canonical form already.
        other => {
            trace!(kind = other, "rendering type via source fallback");
            node_text(node, source).to_string()
        }
    }
}

fn render_channel(node: Node<'_>, source: &str) -> String {
    let Some(value) = node.child_by_field_name("value") else {
        return node_text(node, source).to_string();
    };

    // `chan T`, `chan<- T` and `<-chan T` differ only in their leading tokens.
    let mut prefix = String::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "chan" => prefix.push_str("chan"),
            "<-" => prefix.push_str("<-"),
            _ => break,
        }
    }

    format!("{} {}", prefix, render_type(value, source))
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}
