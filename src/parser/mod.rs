//! Rowan-based incremental parser for BSL
//!
//! This module provides a lossless, incremental parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! Named-node view (crate::syntax) → what the analysis walks
//! ```
//!
//! ## Incremental Reparsing
//!
//! When text changes, [`BslEngine`] either swaps the single edited token into
//! the previous green tree (reusing every other subtree) or parses from
//! scratch. See [`reparse`].

#[allow(clippy::module_inception)]
mod parser;

pub mod grammar;
pub mod keywords;
mod lexer;
pub mod reparse;
mod syntax_kind;

pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use reparse::{BslEngine, ParseEngine, apply_edits};
pub use syntax_kind::{BslLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
