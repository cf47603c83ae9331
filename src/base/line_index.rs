//! Line/column conversion over a text snapshot.
//!
//! Lines are split on `\n`. Both dimensions are 1-based; columns count UTF-16
//! code units from the start of the line, which is how the editing host and the
//! compiler bridge index their strings.

use text_size::TextSize;

/// A 1-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// Precomputed line-start offsets for O(log n) line lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(TextSize::new(i as u32 + 1));
            }
        }
        Self { line_starts }
    }

    /// Number of line-start entries (always at least one).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where the 1-based `line` starts.
    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        let idx = (line as usize).checked_sub(1)?;
        self.line_starts.get(idx).copied()
    }

    /// 0-based index of the line containing `offset`.
    fn line_idx(&self, offset: TextSize) -> usize {
        // Binary search for the last line start <= offset
        let mut lo = 0;
        let mut hi = self.line_starts.len() - 1;
        while lo < hi {
            let mid = (lo + hi + 1) / 2;
            if self.line_starts[mid] <= offset {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        lo
    }

    /// Convert a byte offset into a 1-based line/column.
    ///
    /// `text` must be the snapshot this index was built from.
    pub fn line_col(&self, text: &str, offset: TextSize) -> LineCol {
        let idx = self.line_idx(offset);
        let start = usize::from(self.line_starts[idx]);
        let end = usize::from(offset).min(text.len()).max(start);
        let col = text
            .get(start..end)
            .map(|s| s.encode_utf16().count())
            .unwrap_or(end - start);
        LineCol::new(idx as u32 + 1, col as u32 + 1)
    }

    /// Convert a 1-based line/column back into a byte offset.
    ///
    /// Columns past the end of the line clamp to the line end.
    pub fn offset(&self, text: &str, pos: LineCol) -> Option<TextSize> {
        let start = usize::from(self.line_start(pos.line)?);
        let line_end = text[start..]
            .find('\n')
            .map(|i| start + i)
            .unwrap_or(text.len());

        let mut units = 0u32;
        let wanted = pos.col.saturating_sub(1);
        for (i, ch) in text[start..line_end].char_indices() {
            if units >= wanted {
                return Some(TextSize::new((start + i) as u32));
            }
            units += ch.len_utf16() as u32;
        }
        Some(TextSize::new(line_end as u32))
    }
}
