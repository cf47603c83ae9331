use rowan::NodeOrToken;

use super::TreeNode;
use crate::base::TextRange;
use crate::parser::{Parse, SyntaxElement, SyntaxKind, SyntaxNode};

/// A rowan element seen through the named-node filter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(SyntaxElement);

impl NamedNode {
    pub fn new(element: SyntaxElement) -> Self {
        Self(element)
    }

    /// The `MODULE` root of a parse
    pub fn root(parse: &Parse) -> Self {
        Self(NodeOrToken::Node(parse.syntax()))
    }

    pub fn syntax(&self) -> &SyntaxElement {
        &self.0
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        self.0.as_node()
    }
}

impl From<SyntaxNode> for NamedNode {
    fn from(node: SyntaxNode) -> Self {
        Self(NodeOrToken::Node(node))
    }
}

impl TreeNode for NamedNode {
    fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    fn range(&self) -> TextRange {
        self.0.text_range()
    }

    fn children(&self) -> Vec<Self> {
        match &self.0 {
            NodeOrToken::Node(node) => node
                .children_with_tokens()
                .filter(|child| child.kind().is_named())
                .map(Self)
                .collect(),
            NodeOrToken::Token(_) => Vec::new(),
        }
    }
}
