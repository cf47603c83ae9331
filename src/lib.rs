//! # bsl-ast
//!
//! Syntax-tree analysis for 1C:Enterprise BSL documents: variable bindings,
//! schema-aware type inference and token export for an external compiler.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → AstService facade, bindings, type inference, token export
//!   ↓
//! syntax    → Named-node view (TreeNode), tree queries
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, incremental reparse
//!   ↓
//! base      → Primitives (TextRange, LineIndex, TextEdit)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → ide)
// ============================================================================

/// Foundation types: TextRange, LineIndex, TextEdit
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, incremental engine
pub mod parser;

/// Syntax: named-node view over parsed trees
pub mod syntax;

/// IDE features: bindings, type inference, token export
pub mod ide;

/// Error types
pub mod error;

// Re-export commonly needed items
pub use parser::keywords;

// Re-export foundation types
pub use base::{LineCol, LineIndex, TextEdit, TextRange, TextSize};
pub use error::{AstError, Result};
pub use ide::{AstService, ChainDescriptor, EditorHandle, ServiceConfig};
