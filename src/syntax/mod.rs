//! Named-node view over a syntax tree.
//!
//! The analysis in [`crate::ide`] never touches rowan directly. It walks any
//! tree through the small [`TreeNode`] capability trait, which exposes only
//! named nodes: punctuation, whitespace and bare identifier tokens are
//! invisible, exactly as the grammar's named-node tree presents them.
//!
//! - [`NamedNode`] adapts a rowan tree produced by [`crate::parser`]
//! - [`SyntheticNode`] is a hand-built tree for testing the analysis
//! - [`preorder`] / [`find_node`] are the shared traversals

mod named;
mod synthetic;
mod walk;

pub use named::NamedNode;
pub use synthetic::SyntheticNode;
pub use walk::{Preorder, find_node, preorder};

use crate::base::TextRange;
use crate::parser::SyntaxKind;

/// Node capability interface the analysis is written against
pub trait TreeNode: Clone {
    fn kind(&self) -> SyntaxKind;

    /// Byte range `[from, to)` in the source text
    fn range(&self) -> TextRange;

    /// Named children, in source order
    fn children(&self) -> Vec<Self>;

    fn first_child(&self) -> Option<Self> {
        self.children().into_iter().next()
    }

    fn last_child(&self) -> Option<Self> {
        self.children().pop()
    }

    fn is_empty(&self) -> bool {
        self.range().is_empty()
    }

    /// Slice of `source` covered by this node (empty if out of range)
    fn text<'s>(&self, source: &'s str) -> &'s str {
        let range = self.range();
        source
            .get(usize::from(range.start())..usize::from(range.end()))
            .unwrap_or("")
    }
}
