//! IDE features: high-level analysis over the current document.
//!
//! Everything here works on a [`TreeNode`](crate::syntax::TreeNode) view of
//! the tree, never on rowan directly. The entry point is [`AstService`],
//! which owns the text/tree snapshot and answers:
//!
//! 1. **Bindings**: which assignment or loop defines variable V before O
//! 2. **Type inference**: which schema path V holds at O
//! 3. **Token export**: the flat token stream for the external compiler
//!
//! ## Usage
//!
//! ```ignore
//! use bsl::ide::{AstService, ServiceConfig};
//!
//! let mut service = AstService::new(ServiceConfig::default());
//! service.attach(Box::new(editor));
//! let ty = service.infer_type("Pet", offset);
//! ```

mod bindings;
mod chain;
mod config;
mod debug_log;
mod infer;
mod schema;
mod service;
mod tokens;

pub use bindings::{Binding, find_all_bindings, find_nearest_binding};
pub use chain::{ACCESSOR_METHODS, ARRAY_ELEMENT, ChainDescriptor, ChainWalker};
pub use config::ServiceConfig;
pub use debug_log::{DEFAULT_MAX_ENTRIES, DebugLog, LogEntry, LogLevel, LogTag};
pub use infer::{infer_type, resolve_chain_at, resolve_chain_from_text, schema_annotation, schema_comment};
pub use schema::{ErrorDescription, SchemaError, SchemaRegistry};
pub use service::{AstService, EditorHandle, SubscriptionId};
pub use tokens::{EOF_TERMINAL, IDENTIFIER_TERMINAL, Token, export_tokens, node_terminal, punct_terminal};
