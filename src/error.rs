//! Error types for the analysis core.
//!
//! None of these cross the public [`AstService`](crate::ide::AstService)
//! boundary: the service logs them and answers "no result" instead.

use text_size::TextSize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("parser engine is not initialized")]
    EngineUnavailable,

    #[error("no document is attached")]
    NotAttached,

    #[error("edit at {offset:?} deleting {deleted:?} is out of bounds for text of length {len}")]
    EditOutOfBounds {
        offset: TextSize,
        deleted: TextSize,
        len: usize,
    },

    #[error("edit at {offset:?} does not fall on a character boundary")]
    EditNotOnCharBoundary { offset: TextSize },

    #[error("fragment {fragment:?} is not a parseable expression: {reason}")]
    MalformedFragment { fragment: String, reason: String },

    #[error("invalid service configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = AstError> = std::result::Result<T, E>;
