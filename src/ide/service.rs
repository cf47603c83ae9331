//! AstService, the analysis facade an editing session talks to.
//!
//! The service owns one text/tree snapshot. It is replaced as a whole on
//! attach, on every content change and on [`AstService::force_reparse`], so
//! readers never see a tree from one version paired with text from another.
//!
//! ## Usage
//!
//! ```ignore
//! let mut service = AstService::new(ServiceConfig::default());
//! service.attach(Box::new(editor));
//!
//! // From the host's change-notification handler
//! service.content_changed(&edits);
//!
//! let ty = service.infer_type("Pet", offset);
//! let tokens = service.export_tokens_json();
//! ```
//!
//! Every query answers "no result" when nothing is attached or no parser
//! engine is available; none of them fail.

use crate::base::{LineCol, LineIndex, TextEdit, TextRange, TextSize};
use crate::error::{AstError, Result};
use crate::parser::{BslEngine, Parse, ParseEngine};
use crate::syntax::NamedNode;

use super::bindings::{self, Binding};
use super::chain::ChainDescriptor;
use super::config::ServiceConfig;
use super::debug_log::{DebugLog, LogTag};
use super::infer;
use super::schema::SchemaRegistry;
use super::tokens::{self, Token};

/// Handle of a change-notification subscription on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// The host editing surface.
///
/// Once subscribed, the host forwards each change batch to
/// [`AstService::content_changed`].
pub trait EditorHandle {
    fn current_text(&self) -> String;

    fn subscribe(&self) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);

    /// Host-side position conversion; `None` defers to the service's own
    fn position_to_offset(&self, _pos: LineCol) -> Option<TextSize> {
        None
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    text: String,
    parse: Parse,
}

pub struct AstService {
    engine: Option<Box<dyn ParseEngine>>,
    editor: Option<Box<dyn EditorHandle>>,
    subscription: Option<SubscriptionId>,
    snapshot: Option<Snapshot>,
    schemas: SchemaRegistry,
    log: DebugLog,
}

impl Default for AstService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl AstService {
    /// A service backed by the built-in BSL engine
    pub fn new(config: ServiceConfig) -> Self {
        let engine = if config.incremental {
            BslEngine::new()
        } else {
            BslEngine::full_reparse_only()
        };
        Self::with_engine(config, Some(Box::new(engine)))
    }

    /// A service with a specific engine, or none at all
    pub fn with_engine(config: ServiceConfig, engine: Option<Box<dyn ParseEngine>>) -> Self {
        Self {
            engine,
            editor: None,
            subscription: None,
            snapshot: None,
            schemas: SchemaRegistry::new(),
            log: DebugLog::new(config.debug, config.debug_max_entries),
        }
    }

    pub fn debug_log(&self) -> &DebugLog {
        &self.log
    }

    pub fn set_debug(&self, enabled: bool) {
        self.log.set_enabled(enabled);
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn schemas_mut(&mut self) -> &mut SchemaRegistry {
        &mut self.schemas
    }

    pub fn is_attached(&self) -> bool {
        self.editor.is_some()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start tracking `editor`, replacing any previous attachment
    pub fn attach(&mut self, editor: Box<dyn EditorHandle>) {
        if self.editor.is_some() {
            self.detach();
        }

        self.subscription = Some(editor.subscribe());
        let text = editor.current_text();
        self.editor = Some(editor);

        match self.engine.as_deref() {
            Some(engine) => {
                let parse = engine.parse(&text);
                self.log.debug(LogTag::Ast, "attach", || {
                    format!("initial parse done, {} bytes", text.len())
                });
                self.snapshot = Some(Snapshot { text, parse });
            }
            None => {
                self.log
                    .warn(LogTag::Ast, "attach", || AstError::EngineUnavailable.to_string());
            }
        }
    }

    /// Stop tracking the editor and drop the snapshot
    pub fn detach(&mut self) {
        if let (Some(editor), Some(id)) = (self.editor.as_ref(), self.subscription.take()) {
            editor.unsubscribe(id);
        }
        self.editor = None;
        self.snapshot = None;
        self.log.debug(LogTag::Ast, "detach", String::new);
    }

    /// Full parse of the editor's current text
    pub fn force_reparse(&mut self) {
        let (Some(editor), Some(engine)) = (self.editor.as_ref(), self.engine.as_deref()) else {
            self.log
                .warn(LogTag::Ast, "force_reparse", || "nothing to reparse".to_string());
            return;
        };
        let text = editor.current_text();
        let parse = engine.parse(&text);
        self.snapshot = Some(Snapshot { text, parse });
    }

    /// Apply one host change batch. `edits` are relative to the previous text.
    pub fn content_changed(&mut self, edits: &[TextEdit]) {
        let (Some(editor), Some(engine)) = (self.editor.as_ref(), self.engine.as_deref()) else {
            return;
        };
        let text = editor.current_text();
        let parse = match self.snapshot.as_ref() {
            Some(previous) => engine.update(&previous.parse, &previous.text, &text, edits),
            None => engine.parse(&text),
        };
        self.log.debug(LogTag::Ast, "content_changed", || {
            format!("{} change(s), {} bytes", edits.len(), text.len())
        });
        self.snapshot = Some(Snapshot { text, parse });
    }

    // =========================================================================
    // Snapshot access
    // =========================================================================

    fn snapshot(&self) -> Result<&Snapshot> {
        if self.engine.is_none() {
            return Err(AstError::EngineUnavailable);
        }
        self.snapshot.as_ref().ok_or(AstError::NotAttached)
    }

    fn current(&self, method: &'static str) -> Option<&Snapshot> {
        match self.snapshot() {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                self.log.warn(LogTag::Ast, method, || err.to_string());
                None
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|s| s.text.as_str())
    }

    pub fn parse(&self) -> Option<&Parse> {
        self.snapshot.as_ref().map(|s| &s.parse)
    }

    pub fn tree(&self) -> Option<NamedNode> {
        self.parse().map(NamedNode::root)
    }

    /// Convert a 1-based line/column to a byte offset
    pub fn position_to_offset(&self, pos: LineCol) -> Option<TextSize> {
        if let Some(offset) = self.editor.as_ref().and_then(|e| e.position_to_offset(pos)) {
            return Some(offset);
        }
        let text = self.text()?;
        LineIndex::new(text).offset(text, pos)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn find_all_bindings(&self, name: &str) -> Vec<Binding> {
        let Some(snapshot) = self.current("find_all_bindings") else {
            return Vec::new();
        };
        let root = NamedNode::root(&snapshot.parse);
        let found = bindings::find_all_bindings(&root, &snapshot.text, name);
        self.log.debug(LogTag::Ast, "find_all_bindings", || {
            format!("{:?}: {} binding(s)", name, found.len())
        });
        found
    }

    pub fn find_nearest_binding(&self, name: &str, offset: TextSize) -> Option<Binding> {
        let snapshot = self.current("find_nearest_binding")?;
        let root = NamedNode::root(&snapshot.parse);
        let found = bindings::find_nearest_binding(&root, &snapshot.text, name, offset);
        self.log.debug(LogTag::Ast, "find_nearest_binding", || {
            format!("{:?} before {:?}: {:?}", name, offset, found)
        });
        found
    }

    /// Chain of the statement-level expression or loop collection at `range`
    pub fn resolve_chain(&self, range: TextRange) -> Option<ChainDescriptor> {
        let snapshot = self.current("resolve_chain")?;
        let root = NamedNode::root(&snapshot.parse);
        let result = infer::resolve_chain_at(&root, &snapshot.text, range);
        self.log
            .debug(LogTag::Ast, "resolve_chain", || format!("{:?}: {:?}", range, result));
        result
    }

    pub fn infer_type(&self, name: &str, offset: TextSize) -> Option<ChainDescriptor> {
        let snapshot = self.current("infer_type")?;
        let root = NamedNode::root(&snapshot.parse);
        let result = infer::infer_type(&root, &snapshot.text, name, offset);
        match &result {
            Some(descriptor) => self.log.debug(LogTag::Ast, "infer_type", || {
                format!("{:?} at {:?}: {:?}", name, offset, descriptor)
            }),
            None => self.log.warn(LogTag::Ast, "infer_type", || {
                format!("{:?} at {:?}: no result", name, offset)
            }),
        }
        result
    }

    /// Resolve a typed-but-unfinished chain such as `Pet.Получить("category")`
    pub fn resolve_chain_from_text(&self, fragment: &str) -> Option<ChainDescriptor> {
        let Some(engine) = self.engine.as_deref() else {
            self.log.warn(LogTag::Ast, "resolve_chain_from_text", || {
                AstError::EngineUnavailable.to_string()
            });
            return None;
        };
        match infer::resolve_chain_from_text(engine, fragment) {
            Ok(result) => {
                self.log.debug(LogTag::Ast, "resolve_chain_from_text", || {
                    format!("{:?}: {:?}", fragment, result)
                });
                result
            }
            Err(err) => {
                self.log
                    .warn(LogTag::Ast, "resolve_chain_from_text", || err.to_string());
                None
            }
        }
    }

    /// Token stream for the compiler bridge; `None` without a non-empty text
    pub fn export_tokens(&self) -> Option<Vec<Token>> {
        let snapshot = self.current("export_tokens")?;
        if snapshot.text.is_empty() {
            return None;
        }
        let root = NamedNode::root(&snapshot.parse);
        let tokens = tokens::export_tokens(&root, &snapshot.text);
        self.log.debug(LogTag::Ast, "export_tokens", || {
            format!("{} token(s) from {} bytes", tokens.len(), snapshot.text.len())
        });
        Some(tokens)
    }

    /// [`export_tokens`](Self::export_tokens) as a JSON array, or `""` when
    /// there is nothing to export
    pub fn export_tokens_json(&self) -> String {
        self.export_tokens()
            .and_then(|tokens| serde_json::to_string(&tokens).ok())
            .unwrap_or_default()
    }

    /// Schema property names for `name` at `offset`, for autocomplete
    pub fn schema_properties(&self, name: &str, offset: TextSize) -> Vec<String> {
        let Some(descriptor) = self.infer_type(name, offset) else {
            return Vec::new();
        };
        let names = self.schemas.property_names(&descriptor);
        self.log.debug(LogTag::Schema, "schema_properties", || {
            format!("{:?}: {} propert(ies)", descriptor, names.len())
        });
        names
    }
}
