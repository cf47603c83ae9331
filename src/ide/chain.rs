//! Expression chain walker.
//!
//! Reduces an expression to a `(base, chain)` path into a schema:
//!
//! ```text
//! Pet                                   → pet []
//! Pet.category                          → pet [category]
//! Pet.Получить("category").Получить("id") → pet [category, id]
//! Данные["id"]                           → данные [id]
//! Данные[0]                              → данные [[]]
//! ```
//!
//! This is a structural walk only, nothing is evaluated.

use serde::{Deserialize, Serialize};

use crate::parser::SyntaxKind;
use crate::parser::grammar::MAX_NESTING;
use crate::syntax::TreeNode;

/// Chain entry meaning "element of an array-like collection"
pub const ARRAY_ELEMENT: &str = "[]";

/// Methods whose first literal argument is a key into the receiver.
///
/// Matched against the lowercased method name.
pub const ACCESSOR_METHODS: &[&str] = &[
    "получить",
    "get",
    "вставить",
    "insert",
    "свойство",
    "property",
    "установить",
    "set",
    "удалить",
    "delete",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChainDescriptor {
    /// Lowercased root variable or type name
    pub base: String,
    pub chain: Vec<String>,
}

impl ChainDescriptor {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            chain: Vec::new(),
        }
    }

    pub fn with_chain<I, S>(base: impl Into<String>, chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: base.into(),
            chain: chain.into_iter().map(Into::into).collect(),
        }
    }
}

/// Recursive walker over expressions in `text`
#[derive(Debug, Clone, Copy)]
pub struct ChainWalker<'t> {
    text: &'t str,
}

impl<'t> ChainWalker<'t> {
    pub fn new(text: &'t str) -> Self {
        Self { text }
    }

    /// Resolve `node` to a chain descriptor, or `None` for an unsupported shape.
    ///
    /// Gives up (`None`) on expressions nested deeper than [`MAX_NESTING`].
    pub fn resolve<N: TreeNode>(&self, node: &N) -> Option<ChainDescriptor> {
        self.resolve_at(node, 0)
    }

    fn resolve_at<N: TreeNode>(&self, node: &N, depth: usize) -> Option<ChainDescriptor> {
        if depth >= MAX_NESTING {
            tracing::trace!("[AST] expression nested too deep, giving up");
            return None;
        }
        let depth = depth + 1;

        match node.kind() {
            SyntaxKind::VARIABLE_NAME => Some(ChainDescriptor::new(node.text(self.text).to_lowercase())),

            SyntaxKind::EXPRESSION | SyntaxKind::COLLECTION | SyntaxKind::PARENTHESIZED_EXPR => {
                self.resolve_at(&node.first_child()?, depth)
            }

            SyntaxKind::MEMBER_EXPR => self.resolve_member(node, depth),

            SyntaxKind::CALL_EXPR => self.resolve_call(node, depth),

            // `a = b` mis-read as a comparison: only the right operand matters
            SyntaxKind::BINARY_EXPR => {
                tracing::trace!("[AST] binary expression, walking the last operand");
                self.resolve_at(&node.last_child()?, depth)
            }

            kind => {
                tracing::trace!("[AST] unhandled expression node {:?}", kind);
                None
            }
        }
    }

    fn resolve_member<N: TreeNode>(&self, node: &N, depth: usize) -> Option<ChainDescriptor> {
        let children = node.children();
        let (object, rest) = children.split_first()?;
        let mut descriptor = self.resolve_at(object, depth)?;

        for sibling in rest {
            match sibling.kind() {
                SyntaxKind::PROPERTY_NAME => {
                    descriptor.chain.push(sibling.text(self.text).to_lowercase());
                    break;
                }
                SyntaxKind::INDEX => {
                    let key = match sibling.first_child() {
                        Some(value) if value.kind() == SyntaxKind::STRING => {
                            unquote(value.text(self.text)).to_string()
                        }
                        // Numeric, variable or computed index
                        _ => ARRAY_ELEMENT.to_string(),
                    };
                    descriptor.chain.push(key);
                    break;
                }
                _ => {}
            }
        }

        Some(descriptor)
    }

    fn resolve_call<N: TreeNode>(&self, node: &N, depth: usize) -> Option<ChainDescriptor> {
        let children = node.children();
        let (callee, rest) = children.split_first()?;
        let mut descriptor = self.resolve_at(callee, depth)?;

        let is_accessor = descriptor
            .chain
            .last()
            .is_some_and(|method| ACCESSOR_METHODS.contains(&method.as_str()));
        if !is_accessor {
            return Some(descriptor);
        }
        descriptor.chain.pop();

        if let Some(args) = rest.iter().find(|c| c.kind() == SyntaxKind::ARG_LIST) {
            for arg in args.children() {
                match arg.kind() {
                    SyntaxKind::STRING => {
                        descriptor.chain.push(unquote(arg.text(self.text)).to_string());
                        break;
                    }
                    SyntaxKind::NUMBER => {
                        descriptor.chain.push(ARRAY_ELEMENT.to_string());
                        break;
                    }
                    _ => {}
                }
            }
        }

        Some(descriptor)
    }
}

/// Strip one leading and one trailing `"`
fn unquote(raw: &str) -> &str {
    let raw = raw.strip_prefix('"').unwrap_or(raw);
    raw.strip_suffix('"').unwrap_or(raw)
}
