//! Variable bindings: where a variable acquires a value.
//!
//! Two statement shapes bind a variable:
//!
//! - `x = <expr>;` binds `x` from the end of the statement onwards
//! - `Для Каждого x Из <collection> Цикл ... КонецЦикла` binds `x` from the
//!   end of the collection to the end of the loop
//!
//! Both scans use the iterative [`preorder`] traversal.

use serde::Serialize;

use crate::base::{TextRange, TextSize};
use crate::parser::SyntaxKind;
use crate::syntax::{TreeNode, preorder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Binding {
    pub statement_range: TextRange,
    pub variable_range: TextRange,
    /// Right-hand side, or the loop collection. `None` for an assignment
    /// whose right-hand side failed to parse.
    pub expression_range: Option<TextRange>,
    pub is_loop: bool,
}

impl Binding {
    /// Whether the bound value is visible at `offset`
    pub fn is_valid_at(&self, offset: TextSize) -> bool {
        if self.is_loop {
            match self.expression_range {
                Some(expr) => expr.end() <= offset && offset <= self.statement_range.end(),
                None => false,
            }
        } else {
            self.statement_range.end() <= offset
        }
    }
}

/// All bindings of `name` (case-insensitive), ascending by statement start
pub fn find_all_bindings<N: TreeNode>(root: &N, text: &str, name: &str) -> Vec<Binding> {
    let wanted = name.to_lowercase();
    let matches = |node: &N| node.text(text).to_lowercase() == wanted;

    let mut bindings: Vec<Binding> = preorder(root)
        .filter(|node| node.kind() == SyntaxKind::ASSIGNMENT_STMT)
        .filter_map(|stmt| assignment_binding(&stmt, &matches))
        .collect();

    bindings.extend(
        preorder(root)
            .filter(|node| node.kind() == SyntaxKind::FOR_EACH_STMT)
            .filter_map(|stmt| loop_binding(&stmt, &matches)),
    );

    // Stable, so discovery order breaks ties
    bindings.sort_by_key(|b| b.statement_range.start());
    bindings
}

fn assignment_binding<N: TreeNode>(stmt: &N, matches: impl Fn(&N) -> bool) -> Option<Binding> {
    let children = stmt.children();
    let (target, rest) = children.split_first()?;
    if target.kind() != SyntaxKind::VARIABLE_NAME || !matches(target) {
        return None;
    }

    let expression_range = rest
        .iter()
        .find(|child| child.kind() == SyntaxKind::EXPRESSION)
        .map(|expr| expr.range());

    Some(Binding {
        statement_range: stmt.range(),
        variable_range: target.range(),
        expression_range,
        is_loop: false,
    })
}

fn loop_binding<N: TreeNode>(stmt: &N, matches: impl Fn(&N) -> bool) -> Option<Binding> {
    let mut variable = None;
    let mut collection = None;
    for child in stmt.children() {
        match child.kind() {
            SyntaxKind::VARIABLE_NAME if variable.is_none() && matches(&child) => {
                variable = Some(child.range());
            }
            SyntaxKind::COLLECTION => collection = Some(child.range()),
            _ => {}
        }
    }

    Some(Binding {
        statement_range: stmt.range(),
        variable_range: variable?,
        expression_range: Some(collection?),
        is_loop: true,
    })
}

/// The binding of `name` in effect at `offset`.
///
/// The latest binding whose validity window contains `offset` wins, so a
/// reassignment shadows earlier ones and an enclosing loop shadows bindings
/// before it.
pub fn find_nearest_binding<N: TreeNode>(
    root: &N,
    text: &str,
    name: &str,
    offset: TextSize,
) -> Option<Binding> {
    find_all_bindings(root, text, name)
        .into_iter()
        .rev()
        .find(|binding| binding.is_valid_at(offset))
}
