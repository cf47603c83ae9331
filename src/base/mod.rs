//! Foundation types for the BSL analysis toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`TextEdit`] - A single host-reported edit
//!
//! This module has NO dependencies on other crate modules.

mod edit;
mod line_index;

pub use edit::TextEdit;
pub use line_index::{LineCol, LineIndex};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
