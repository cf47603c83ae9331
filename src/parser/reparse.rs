//! Incremental reparsing
//!
//! The analysis layer never talks to the parser directly; it goes through a
//! [`ParseEngine`], which owns the policy for turning a previous parse plus a
//! batch of edits into a parse of the new text.
//!
//! [`BslEngine`] reuses the previous green tree when a single edit stays
//! inside one identifier, number, string, comment or whitespace token: only
//! that token is relexed and swapped in with `replace_with`, every other green
//! subtree is shared with the previous tree. Any other edit falls back to a
//! full parse.

use rowan::{GreenToken, TextRange, TextSize};

use super::lexer::tokenize;
use super::parser::{Parse, SyntaxError, parse};
use super::syntax_kind::{SyntaxKind, SyntaxToken};
use crate::base::TextEdit;
use crate::error::{AstError, Result};

/// A parser that can produce a tree from scratch or update a previous one.
pub trait ParseEngine: Send + Sync {
    /// Full parse of `text`
    fn parse(&self, text: &str) -> Parse;

    /// Parse `text`, given that it is `previous_text` with `edits` applied.
    ///
    /// The returned tree always covers exactly `text`.
    fn update(&self, previous: &Parse, previous_text: &str, text: &str, edits: &[TextEdit])
    -> Parse;
}

/// The built-in BSL engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BslEngine {
    incremental: bool,
}

impl Default for BslEngine {
    fn default() -> Self {
        Self { incremental: true }
    }
}

impl BslEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that fully reparses on every update
    pub fn full_reparse_only() -> Self {
        Self { incremental: false }
    }

    pub fn is_incremental(&self) -> bool {
        self.incremental
    }
}

impl ParseEngine for BslEngine {
    fn parse(&self, text: &str) -> Parse {
        parse(text)
    }

    fn update(
        &self,
        previous: &Parse,
        previous_text: &str,
        text: &str,
        edits: &[TextEdit],
    ) -> Parse {
        if !self.incremental || edits.is_empty() {
            return parse(text);
        }

        match apply_edits(previous_text, edits) {
            Ok(applied) if applied == text => {}
            Ok(_) => {
                tracing::warn!("[AST] edits do not reproduce the new text, reparsing in full");
                return parse(text);
            }
            Err(err) => {
                tracing::warn!("[AST] {err}, reparsing in full");
                return parse(text);
            }
        }

        if let [edit] = edits {
            if let Some(reparsed) = reparse_token(previous, edit) {
                if reparsed.syntax().text() == text {
                    tracing::trace!("[AST] token-level reparse at {:?}", edit.offset);
                    return reparsed;
                }
                tracing::warn!("[AST] token reparse diverged from the new text, reparsing in full");
            }
        }

        parse(text)
    }
}

/// Apply `edits` (all relative to `text`) and return the edited text.
///
/// Edits are applied from the highest offset down so earlier offsets stay
/// valid while later ones are spliced in.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String> {
    let mut order: Vec<&TextEdit> = edits.iter().collect();
    order.sort_by(|a, b| b.offset.cmp(&a.offset));

    let mut result = text.to_string();
    for edit in order {
        let range = edit.delete_range().ok_or_else(|| AstError::EditOutOfBounds {
            offset: edit.offset,
            deleted: edit.deleted_len,
            len: result.len(),
        })?;
        let start = usize::from(range.start());
        let end = usize::from(range.end());
        if end > result.len() {
            return Err(AstError::EditOutOfBounds {
                offset: edit.offset,
                deleted: edit.deleted_len,
                len: result.len(),
            });
        }
        if !result.is_char_boundary(start) {
            return Err(AstError::EditNotOnCharBoundary { offset: range.start() });
        }
        if !result.is_char_boundary(end) {
            return Err(AstError::EditNotOnCharBoundary { offset: range.end() });
        }
        result.replace_range(start..end, &edit.inserted);
    }
    Ok(result)
}

/// Token kinds whose text can change without affecting tree structure
fn is_relexable(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::NUMBER
            | SyntaxKind::STRING
            | SyntaxKind::LINE_COMMENT
            | SyntaxKind::WHITESPACE
    )
}

fn reparse_token(previous: &Parse, edit: &TextEdit) -> Option<Parse> {
    let root = previous.syntax();
    let edit_range = edit.delete_range()?;
    if edit_range.end() > root.text_range().end() {
        return None;
    }

    let token = root
        .token_at_offset(edit.offset)
        .find(|t| is_relexable(t.kind()) && t.text_range().contains_range(edit_range))?;
    let new_text = splice_token(&token, edit)?;

    // The edited text must still lex as exactly one token of the same kind
    let relexed = tokenize(&new_text);
    match relexed.as_slice() {
        [single] if single.kind == token.kind() && single.text.len() == new_text.len() => {}
        _ => return None,
    }

    let green = token.replace_with(GreenToken::new(token.kind().into(), &new_text));
    let errors = shift_errors(&previous.errors, token.text_range(), edit);
    Some(Parse { green, errors })
}

fn splice_token(token: &SyntaxToken, edit: &TextEdit) -> Option<String> {
    let token_start = token.text_range().start();
    let rel_start = usize::from(edit.offset - token_start);
    let rel_end = rel_start + usize::from(edit.deleted_len);
    let text = token.text();
    if !text.is_char_boundary(rel_start) || !text.is_char_boundary(rel_end) {
        return None;
    }
    let mut new_text = String::with_capacity(text.len() + edit.inserted.len());
    new_text.push_str(&text[..rel_start]);
    new_text.push_str(&edit.inserted);
    new_text.push_str(&text[rel_end..]);
    if new_text.is_empty() { None } else { Some(new_text) }
}

/// Move error ranges to account for a single edit inside `token_range`.
fn shift_errors(errors: &[SyntaxError], token_range: TextRange, edit: &TextEdit) -> Vec<SyntaxError> {
    let delta = edit.len_delta();
    let shift = |offset: TextSize| -> TextSize {
        let moved = i64::from(u32::from(offset)) + delta;
        TextSize::new(moved.max(0) as u32)
    };

    errors
        .iter()
        .map(|error| {
            let range = error.range;
            let new_range = if range.start() >= token_range.end() {
                TextRange::new(shift(range.start()), shift(range.end()))
            } else if range.end() >= token_range.end() {
                TextRange::new(range.start(), shift(range.end()))
            } else {
                range
            };
            SyntaxError::new(error.message.clone(), new_range)
        })
        .collect()
}
