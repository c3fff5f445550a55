use crate::{TextRange, TextSize};

/// An editor selection: ordered, disjoint text ranges.
///
/// A collapsed (empty) range is a caret. Consumers that operate on lines treat a
/// caret as "the line the caret is on".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    ranges: Vec<TextRange>,
}

impl Selection {
    /// Builds a selection from arbitrary ranges, sorting them and merging overlaps.
    pub fn new(ranges: impl IntoIterator<Item = TextRange>) -> Self {
        let mut ranges: Vec<TextRange> = ranges.into_iter().collect();
        ranges.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.end().cmp(&b.end())));

        let mut merged: Vec<TextRange> = Vec::with_capacity(ranges.len());
        for range in ranges {
            if let Some(last) = merged.last_mut() {
                if range.start() < last.end() {
                    *last = last.cover(range);
                    continue;
                }
            }
            merged.push(range);
        }

        Self { ranges: merged }
    }

    pub fn caret(offset: TextSize) -> Self {
        Self {
            ranges: vec![TextRange::empty(offset)],
        }
    }

    pub fn single(range: TextRange) -> Self {
        Self {
            ranges: vec![range],
        }
    }

    pub fn ranges(&self) -> &[TextRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The first range of the selection, if any.
    pub fn primary(&self) -> Option<TextRange> {
        self.ranges.first().copied()
    }
}
