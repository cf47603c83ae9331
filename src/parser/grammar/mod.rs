//! Grammar rules for BSL modules
//!
//! This module contains the parsing logic organized by construct:
//! - `statements` - Module items, method definitions and statements
//! - `expressions` - Expression precedence chain and postfix chains
//!
//! The parsing functions are generic over the [`BslParser`] trait so they can
//! be used with any parser implementation.

mod expressions;
mod statements;

pub(super) use crate::parser::syntax_kind::SyntaxKind;
pub(super) use rowan::Checkpoint;

pub use expressions::{at_expression_start, parse_expression, parse_root_expression};
pub use statements::{parse_module_items, parse_statement};

/// Tokens that close a block. A block never consumes them.
pub const BLOCK_END: &[SyntaxKind] = &[
    SyntaxKind::ELSIF_KW,
    SyntaxKind::ELSE_KW,
    SyntaxKind::ENDIF_KW,
    SyntaxKind::ENDDO_KW,
    SyntaxKind::EXCEPT_KW,
    SyntaxKind::ENDTRY_KW,
    SyntaxKind::ENDPROCEDURE_KW,
    SyntaxKind::ENDFUNCTION_KW,
    SyntaxKind::PROCEDURE_KW,
    SyntaxKind::FUNCTION_KW,
];

/// Deepest expression or block nesting the grammar descends into.
///
/// Past it the rest of the input is wrapped in a single `ERROR` node.
pub const MAX_NESTING: usize = 256;

/// Trait for parsing operations
///
/// This trait defines the interface between the grammar rules and the main parser.
/// All inspection methods look past trivia; trivia is only consumed when a token
/// is bumped or a node is started, so nodes never end in trivia.
pub trait BslParser {
    // Token inspection
    fn current_kind(&self) -> SyntaxKind;
    fn current_text(&self) -> &str;
    fn at_eof(&self) -> bool;

    /// Peek at the kind of the nth significant token ahead
    fn nth(&self, n: usize) -> SyntaxKind;

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    /// Identifier, or a keyword used in name position (`Запрос.Выполнить()`)
    fn at_name(&self) -> bool {
        !self.at_eof() && (self.at(SyntaxKind::IDENT) || self.current_kind().is_keyword())
    }

    // Position tracking
    fn get_pos(&self) -> usize;

    // Token consumption
    fn bump(&mut self);
    /// Bump the current token, recording it under a different kind
    fn bump_as(&mut self, kind: SyntaxKind);
    /// Bump the raw next token, trivia included
    fn bump_any(&mut self);
    fn skip_trivia(&mut self);

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    // Node building
    fn start_node(&mut self, kind: SyntaxKind);
    fn finish_node(&mut self);
    fn checkpoint(&mut self) -> Checkpoint;
    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind);

    // Error handling
    fn error(&mut self, message: String);
    fn error_recover(&mut self, message: String, recovery: &[SyntaxKind]);

    // Nesting
    /// Enter one nesting level. Returns false, having consumed the rest of
    /// the input into an `ERROR` node, once [`MAX_NESTING`] is reached.
    fn enter_nesting(&mut self) -> bool;
    fn exit_nesting(&mut self);
}

/// Wrap the current name-like token in a node of `kind`.
///
/// Keywords in name position are recorded as plain identifiers.
pub(crate) fn parse_name<P: BslParser>(p: &mut P, kind: SyntaxKind) -> bool {
    if !p.at_name() {
        p.error(format!("expected name for {:?}", kind));
        return false;
    }
    p.start_node(kind);
    p.bump_as(SyntaxKind::IDENT);
    p.finish_node();
    true
}
