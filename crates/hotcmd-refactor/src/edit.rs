use hotcmd_core::{TextRange, TextSize};
use hotcmd_syntax::SyntaxTree;
use similar::TextDiff;
use thiserror::Error;

/// A single replacement in a document's text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn insert(offset: TextSize, text: impl Into<String>) -> Self {
        Self {
            range: TextRange::empty(offset),
            replacement: text.into(),
        }
    }

    pub fn replace(range: TextRange, text: impl Into<String>) -> Self {
        Self {
            range,
            replacement: text.into(),
        }
    }

    pub fn delete(range: TextRange) -> Self {
        Self {
            range,
            replacement: String::new(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("overlapping edits: {first:?} overlaps {second:?}")]
    OverlappingEdits { first: TextRange, second: TextRange },
    #[error("text edit range {range:?} is outside the text bounds (len={len})")]
    OutOfBounds { range: TextRange, len: usize },
}

/// Apply a set of edits to `original` and return the modified text.
///
/// Edits may come in any order but must not overlap. Inserts at the same offset
/// are applied in the order given.
pub fn apply_text_edits(original: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(original.to_string());
    }

    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| (edit.range.start(), edit.range.end()));

    for pair in sorted.windows(2) {
        let (first, second) = (pair[0].range, pair[1].range);
        if second.start() < first.end() {
            return Err(EditError::OverlappingEdits { first, second });
        }
    }

    let mut out = original.to_string();
    for edit in sorted.into_iter().rev() {
        let len = out.len();
        let range = std::ops::Range::<usize>::from(edit.range);
        if range.end > len || !out.is_char_boundary(range.start) || !out.is_char_boundary(range.end)
        {
            return Err(EditError::OutOfBounds {
                range: edit.range,
                len,
            });
        }
        out.replace_range(range, &edit.replacement);
    }

    Ok(out)
}

/// The single smallest edit turning `old`'s text into `new`'s, `None` if the
/// texts are equal.
pub fn tree_edit(old: &SyntaxTree, new: &SyntaxTree) -> Option<TextEdit> {
    let old_text = old.text();
    let new_text = new.text();
    if old_text == new_text {
        return None;
    }

    let prefix = common_prefix_len(&old_text, &new_text);
    let suffix = common_suffix_len(&old_text[prefix..], &new_text[prefix..]);
    let range = TextRange::new(
        TextSize::from(prefix as u32),
        TextSize::from((old_text.len() - suffix) as u32),
    );
    Some(TextEdit::replace(
        range,
        &new_text[prefix..new_text.len() - suffix],
    ))
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map_or(a.len().min(b.len()), |((idx, _), _)| idx)
}

fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// Renders the change from `old` to `new` as a unified diff with three
/// lines of context.
pub fn unified_diff(old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header("before", "after")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_and_suffix_respect_char_boundaries() {
        assert_eq!(common_prefix_len("aéb", "aéc"), 3);
        assert_eq!(common_prefix_len("ab", "abc"), 2);
        assert_eq!(common_suffix_len("xé", "yé"), 2);
        assert_eq!(common_suffix_len("", "a"), 0);
    }
}
