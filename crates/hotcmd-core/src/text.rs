//! Text model primitives: sizes, ranges, and line lookups.

use serde::{Deserialize, Serialize};

pub use text_size::{TextRange, TextSize};

/// Zero-based line and UTF-8 byte column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Line layout of one text snapshot.
///
/// Each line is stored as its visible extent, without the line break, so
/// `line_start(n)..line_end(n)` never covers `\n` or `\r\n`. A lone `\r`
/// also breaks a line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineIndex {
    lines: Vec<TextRange>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let len = TextSize::of(text);
        let mut lines = Vec::new();
        let mut start = TextSize::from(0);
        let mut rest = text;

        while let Some(at) = rest.find(['\n', '\r']) {
            let break_len = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
            let line_end = start + TextSize::from(at as u32);
            lines.push(TextRange::new(start, line_end));
            start = line_end + TextSize::from(break_len);
            rest = &rest[at + break_len as usize..];
        }
        lines.push(TextRange::new(start, len));

        Self { lines, len }
    }

    #[inline]
    pub fn text_len(&self) -> TextSize {
        self.len
    }

    #[inline]
    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        self.lines.get(line as usize).map(|range| range.start())
    }

    pub fn line_end(&self, line: u32) -> Option<TextSize> {
        self.lines.get(line as usize).map(|range| range.end())
    }

    /// Line holding `offset`; a line-break offset belongs to the line it ends
    /// and offsets beyond the text belong to the last line.
    fn line_of(&self, offset: TextSize) -> usize {
        let offset = offset.min(self.len);
        self.lines
            .partition_point(|range| range.start() <= offset)
            .saturating_sub(1)
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self.line_of(offset);
        let range = self.lines[line];
        let col = offset.clamp(range.start(), range.end()) - range.start();
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// `None` for lines past the end and columns past the line's extent.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let range = *self.lines.get(line_col.line as usize)?;
        let offset = range.start().checked_add(TextSize::from(line_col.col))?;
        (offset <= range.end()).then_some(offset)
    }

    /// The extent of the line containing `offset`, without its line break.
    pub fn line_range(&self, offset: TextSize) -> TextRange {
        self.lines[self.line_of(offset)]
    }
}
