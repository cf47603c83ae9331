//! Structural type inference for variables.
//!
//! `infer_type` answers "what schema path does variable V hold at offset O":
//! the nearest binding is found, a `// @schema TypeName` annotation on or just
//! above it wins outright, otherwise the bound expression is walked with
//! [`ChainWalker`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::bindings::{Binding, find_nearest_binding};
use super::chain::{ARRAY_ELEMENT, ChainDescriptor, ChainWalker};
use crate::base::{TextRange, TextSize};
use crate::error::{AstError, Result};
use crate::parser::{ParseEngine, SyntaxKind};
use crate::syntax::{NamedNode, TreeNode, find_node, preorder};

static SCHEMA_ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)//\s*@schema\s+([A-Za-z0-9_\x{0410}-\x{044F}\x{0401}\x{0451}]+)")
        .expect("schema annotation pattern is valid")
});

/// Name of the temporary variable fragments are assigned to
const FRAGMENT_VARIABLE: &str = "__x__";

/// Type name from a `// @schema TypeName` comment in `line`
pub fn schema_annotation(line: &str) -> Option<&str> {
    SCHEMA_ANNOTATION
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Look for a schema annotation on the lines spanning `range`, then on the
/// line directly above.
pub fn schema_comment(text: &str, range: TextRange) -> Option<&str> {
    let start = usize::from(range.start()).min(text.len());
    let end = usize::from(range.end()).min(text.len()).max(start);

    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);
    if let Some(name) = schema_annotation(&text[line_start..line_end]) {
        return Some(name);
    }

    if line_start == 0 {
        return None;
    }
    let prev_end = line_start - 1;
    let prev_start = text[..prev_end].rfind('\n').map_or(0, |i| i + 1);
    schema_annotation(text[prev_start..prev_end].trim())
}

/// The span an annotation must sit on for `binding`.
///
/// For a loop that is the header (loop start through the collection), not
/// the whole body.
fn annotation_span(binding: &Binding) -> TextRange {
    match (binding.is_loop, binding.expression_range) {
        (true, Some(collection)) => {
            TextRange::new(binding.statement_range.start(), collection.end())
        }
        _ => binding.statement_range,
    }
}

/// Infer the chain descriptor of `name` at `offset`.
pub fn infer_type<N: TreeNode>(
    root: &N,
    text: &str,
    name: &str,
    offset: TextSize,
) -> Option<ChainDescriptor> {
    let binding = find_nearest_binding(root, text, name, offset)?;
    let expression = binding.expression_range?;

    if let Some(type_name) = schema_comment(text, annotation_span(&binding)) {
        return Some(ChainDescriptor::new(type_name.to_lowercase()));
    }

    let mut descriptor = resolve_chain_at(root, text, expression)?;
    if binding.is_loop {
        descriptor.chain.push(ARRAY_ELEMENT.to_string());
    }
    Some(descriptor)
}

/// Resolve the statement-level expression (or loop collection) at `range`
pub fn resolve_chain_at<N: TreeNode>(
    root: &N,
    text: &str,
    range: TextRange,
) -> Option<ChainDescriptor> {
    let node = find_node(
        root,
        range,
        &[SyntaxKind::EXPRESSION, SyntaxKind::COLLECTION],
    )?;
    ChainWalker::new(text).resolve(&node)
}

/// Resolve a free-standing expression such as `Pet.Получить("category")`.
///
/// The fragment is parsed on its own as `__x__ = <fragment>;`, never against
/// the live document.
pub fn resolve_chain_from_text(
    engine: &dyn ParseEngine,
    fragment: &str,
) -> Result<Option<ChainDescriptor>> {
    let wrapped = format!("{FRAGMENT_VARIABLE} = {fragment};");
    let parse = engine.parse(&wrapped);
    if let Some(error) = parse.errors.first() {
        return Err(AstError::MalformedFragment {
            fragment: fragment.to_string(),
            reason: error.message.clone(),
        });
    }

    let root = NamedNode::root(&parse);
    let expression = preorder(&root)
        .find(|node| node.kind() == SyntaxKind::EXPRESSION)
        .ok_or_else(|| AstError::MalformedFragment {
            fragment: fragment.to_string(),
            reason: "no expression in fragment".to_string(),
        })?;

    Ok(ChainWalker::new(&wrapped).resolve(&expression))
}
