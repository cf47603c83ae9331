use super::TreeNode;
use crate::base::{TextRange, TextSize};
use crate::parser::SyntaxKind;

/// A hand-built tree, independent of any parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticNode {
    kind: SyntaxKind,
    range: TextRange,
    children: Vec<SyntheticNode>,
}

impl SyntheticNode {
    pub fn new(kind: SyntaxKind, range: TextRange, children: Vec<SyntheticNode>) -> Self {
        Self {
            kind,
            range,
            children,
        }
    }

    pub fn leaf(kind: SyntaxKind, start: u32, end: u32) -> Self {
        Self::new(
            kind,
            TextRange::new(TextSize::new(start), TextSize::new(end)),
            Vec::new(),
        )
    }

    /// A node spanning from its first child's start to its last child's end
    pub fn branch(kind: SyntaxKind, children: Vec<SyntheticNode>) -> Self {
        let range = match (children.first(), children.last()) {
            (Some(first), Some(last)) => TextRange::new(first.range.start(), last.range.end()),
            _ => TextRange::empty(TextSize::new(0)),
        };
        Self::new(kind, range, children)
    }
}

impl TreeNode for SyntheticNode {
    fn kind(&self) -> SyntaxKind {
        self.kind
    }

    fn range(&self) -> TextRange {
        self.range
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }
}
