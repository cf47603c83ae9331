use super::TreeNode;
use crate::base::TextRange;
use crate::parser::SyntaxKind;

/// Iterative pre-order traversal.
///
/// Uses an explicit stack, so depth is bounded by heap rather than the call
/// stack.
pub struct Preorder<N> {
    stack: Vec<N>,
}

impl<N: TreeNode> Iterator for Preorder<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let node = self.stack.pop()?;
        // Push in reverse so the first child is visited next
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

/// Visit `root` and all of its named descendants in document order
pub fn preorder<N: TreeNode>(root: &N) -> Preorder<N> {
    Preorder {
        stack: vec![root.clone()],
    }
}

/// Find the outermost node of one of `kinds` whose range is exactly `range`.
///
/// Only nodes whose range contains `range` are descended into. An empty
/// `kinds` matches any kind.
pub fn find_node<N: TreeNode>(root: &N, range: TextRange, kinds: &[SyntaxKind]) -> Option<N> {
    let mut current = root.clone();
    loop {
        if current.range() == range && (kinds.is_empty() || kinds.contains(&current.kind())) {
            return Some(current);
        }
        current = current
            .children()
            .into_iter()
            .find(|child| child.range().contains_range(range))?;
    }
}
