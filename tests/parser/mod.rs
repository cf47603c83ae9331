//! Parser tests
//!
//! Tests for:
//! - Bilingual module parsing
//! - Incremental reparse against full parse

pub mod tests_parse;
