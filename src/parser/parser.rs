//! Recursive descent parser for BSL
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::grammar::{self, BslParser};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse BSL source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, input.len());
    parser.parse_module();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    text_len: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], text_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            text_len,
            depth: 0,
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    /// Index of the next non-trivia token at or after `self.pos`
    fn significant(&self, mut idx: usize) -> Option<usize> {
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                return Some(idx);
            }
            idx += 1;
        }
        None
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// Module = (Annotation* MethodDef | VarStmt | Statement)*
    ///
    /// The root starts before any leading trivia so it spans the whole text.
    fn parse_module(&mut self) {
        self.builder.start_node(SyntaxKind::MODULE.into());
        grammar::parse_module_items(self);
        self.skip_trivia();
        // Leftover tokens are impossible after the item loop, but keep the CST lossless
        while self.pos < self.tokens.len() {
            self.bump_any();
        }
        self.builder.finish_node();
    }
}

impl BslParser for Parser<'_> {
    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn current_text(&self) -> &str {
        self.significant(self.pos)
            .map(|idx| self.tokens[idx].text)
            .unwrap_or("")
    }

    fn at_eof(&self) -> bool {
        self.significant(self.pos).is_none()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    fn get_pos(&self) -> usize {
        self.pos
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump_as(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump_any(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    // =========================================================================
    // Node building
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: String) {
        let range = self
            .significant(self.pos)
            .map(|idx| {
                let t = &self.tokens[idx];
                TextRange::at(t.offset, TextSize::of(t.text))
            })
            .unwrap_or_else(|| TextRange::empty(TextSize::new(self.text_len as u32)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: String, recovery: &[SyntaxKind]) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        // If we didn't consume anything and we're not at EOF, consume one token
        // to prevent infinite loops
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Nesting
    // =========================================================================

    fn enter_nesting(&mut self) -> bool {
        if self.depth < grammar::MAX_NESTING {
            self.depth += 1;
            return true;
        }
        if !self.at_eof() {
            self.error(format!("nesting deeper than {} levels", grammar::MAX_NESTING));
            self.start_node(SyntaxKind::ERROR);
            while !self.at_eof() {
                self.bump();
            }
            self.finish_node();
        }
        false
    }

    fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
