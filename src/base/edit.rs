use serde::{Deserialize, Serialize};
use text_size::{TextRange, TextSize};

/// One host-reported change: `deleted_len` bytes at `offset` replaced by `inserted`.
///
/// Offsets refer to the text as it was before the edit batch was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub offset: TextSize,
    pub deleted_len: TextSize,
    pub inserted: String,
}

impl TextEdit {
    pub fn new(offset: u32, deleted_len: u32, inserted: impl Into<String>) -> Self {
        Self {
            offset: TextSize::new(offset),
            deleted_len: TextSize::new(deleted_len),
            inserted: inserted.into(),
        }
    }

    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::new(offset, 0, text)
    }

    pub fn delete(offset: u32, len: u32) -> Self {
        Self::new(offset, len, String::new())
    }

    /// Range of the original text removed by this edit, `None` if it would
    /// end past `u32::MAX`.
    pub fn delete_range(&self) -> Option<TextRange> {
        let end = self.offset.checked_add(self.deleted_len)?;
        Some(TextRange::new(self.offset, end))
    }

    /// Signed change in text length.
    pub fn len_delta(&self) -> i64 {
        self.inserted.len() as i64 - i64::from(u32::from(self.deleted_len))
    }
}
