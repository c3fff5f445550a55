use hotcmd_core::{LineIndex, Selection, TextRange};
use hotcmd_syntax::{SyntaxKind, SyntaxToken, SyntaxTree};
use serde::{Deserialize, Serialize};

/// Lexical category of a classified span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationKind {
    Comment,
    Keyword,
    Identifier,
    StringLiteral,
    NumericLiteral,
    Punctuation,
    /// Any tag the host's classifier uses that has no dedicated kind.
    Other(String),
}

impl ClassificationKind {
    /// Maps a free-form classifier tag to a kind.
    ///
    /// Any tag mentioning "comment" in any casing (`"comment"`,
    /// `"XML Doc Comment"`, ...) classifies as [`ClassificationKind::Comment`].
    pub fn from_tag(tag: &str) -> Self {
        let lower = tag.trim().to_lowercase();
        if lower.contains("comment") {
            return ClassificationKind::Comment;
        }
        match lower.as_str() {
            "keyword" => ClassificationKind::Keyword,
            "identifier" => ClassificationKind::Identifier,
            "string" => ClassificationKind::StringLiteral,
            "number" => ClassificationKind::NumericLiteral,
            "punctuation" | "operator" => ClassificationKind::Punctuation,
            _ => ClassificationKind::Other(tag.to_owned()),
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, ClassificationKind::Comment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationSpan {
    pub range: TextRange,
    pub kind: ClassificationKind,
}

impl ClassificationSpan {
    pub fn new(range: TextRange, kind: ClassificationKind) -> Self {
        Self { range, kind }
    }

    pub fn from_tag(range: TextRange, tag: &str) -> Self {
        Self::new(range, ClassificationKind::from_tag(tag))
    }

    fn overlaps(&self, range: TextRange) -> bool {
        overlaps(self.range, range)
    }
}

/// Non-empty intersection; spans that merely touch `range` do not overlap it.
fn overlaps(a: TextRange, b: TextRange) -> bool {
    a.start() < b.end() && b.start() < a.end()
}

/// Answers which classification spans overlap a text range.
pub trait Classifier {
    fn classification_spans(&self, range: TextRange) -> Vec<ClassificationSpan>;
}

/// Classifies the tokens of a syntax tree. Whitespace and line breaks are not
/// classified.
#[derive(Debug, Clone)]
pub struct SyntaxClassifier {
    tree: SyntaxTree,
}

impl SyntaxClassifier {
    pub fn new(tree: &SyntaxTree) -> Self {
        Self { tree: tree.clone() }
    }
}

fn token_kind(token: &SyntaxToken) -> Option<ClassificationKind> {
    let kind = token.kind();
    Some(match kind {
        SyntaxKind::Whitespace | SyntaxKind::Newline => return None,
        _ if kind.is_comment() => ClassificationKind::Comment,
        SyntaxKind::Identifier => ClassificationKind::Identifier,
        SyntaxKind::StringLiteral | SyntaxKind::CharLiteral => ClassificationKind::StringLiteral,
        SyntaxKind::NumericLiteral => ClassificationKind::NumericLiteral,
        _ if kind.is_keyword() => ClassificationKind::Keyword,
        _ if kind.is_punctuation() => ClassificationKind::Punctuation,
        _ => ClassificationKind::Other(format!("{kind:?}").to_lowercase()),
    })
}

impl Classifier for SyntaxClassifier {
    fn classification_spans(&self, range: TextRange) -> Vec<ClassificationSpan> {
        self.tree
            .root()
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| overlaps(token.text_range(), range))
            .filter_map(|token| {
                token_kind(&token).map(|kind| ClassificationSpan::new(token.text_range(), kind))
            })
            .collect()
    }
}

/// A fixed list of spans, as produced by an external lexer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticClassifier {
    spans: Vec<ClassificationSpan>,
}

impl StaticClassifier {
    pub fn new(spans: impl IntoIterator<Item = ClassificationSpan>) -> Self {
        let mut spans: Vec<ClassificationSpan> = spans.into_iter().collect();
        spans.sort_by_key(|span| (span.range.start(), span.range.end()));
        Self { spans }
    }

    /// Builds the classifier from `(range, tag)` pairs with free-form tags.
    pub fn from_tags<'a>(spans: impl IntoIterator<Item = (TextRange, &'a str)>) -> Self {
        Self::new(
            spans
                .into_iter()
                .map(|(range, tag)| ClassificationSpan::from_tag(range, tag)),
        )
    }
}

impl Classifier for StaticClassifier {
    fn classification_spans(&self, range: TextRange) -> Vec<ClassificationSpan> {
        self.spans
            .iter()
            .filter(|span| span.overlaps(range))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleCommentAction {
    Comment,
    Uncomment,
}

/// Whether every classified span in every selected range is a comment.
///
/// A caret (empty range) stands for its whole line. Ranges without any
/// classified span, such as blank lines, count as not commented, and so does
/// an empty selection.
pub fn is_fully_commented<C: Classifier + ?Sized>(
    lines: &LineIndex,
    selection: &Selection,
    classifier: &C,
) -> bool {
    if selection.is_empty() {
        return false;
    }
    selection.ranges().iter().all(|&range| {
        let range = if range.is_empty() {
            lines.line_range(range.start())
        } else {
            range
        };
        let spans = classifier.classification_spans(range);
        !spans.is_empty() && spans.iter().all(|span| span.kind.is_comment())
    })
}

/// `Uncomment` when the selection is fully commented, `Comment` otherwise.
pub fn toggle_comment_action<C: Classifier + ?Sized>(
    lines: &LineIndex,
    selection: &Selection,
    classifier: &C,
) -> ToggleCommentAction {
    if is_fully_commented(lines, selection, classifier) {
        ToggleCommentAction::Uncomment
    } else {
        ToggleCommentAction::Comment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotcmd_core::TextSize;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::from(start), TextSize::from(end))
    }

    #[test]
    fn tags_mentioning_comment_are_comments() {
        for tag in ["comment", "Comment", "XML Doc Comment", "excluded comment"] {
            assert_eq!(ClassificationKind::from_tag(tag), ClassificationKind::Comment);
        }
        assert_eq!(
            ClassificationKind::from_tag("Keyword"),
            ClassificationKind::Keyword
        );
        assert_eq!(
            ClassificationKind::from_tag("preprocessor keyword"),
            ClassificationKind::Other("preprocessor keyword".to_owned())
        );
    }

    #[test]
    fn touching_spans_do_not_overlap() {
        let classifier = StaticClassifier::from_tags([
            (range(0, 4), "keyword"),
            (range(4, 10), "comment"),
        ]);
        let spans = classifier.classification_spans(range(4, 6));
        assert_eq!(spans, vec![ClassificationSpan::from_tag(range(4, 10), "comment")]);
        assert!(classifier.classification_spans(range(4, 4)).is_empty());
    }

    #[test]
    fn one_non_comment_span_flips_the_result() {
        let text = "// a\n// b\nint x;\n";
        let lines = LineIndex::new(text);
        let comments = [(range(0, 4), "comment"), (range(5, 9), "comment")];

        let all_comments = StaticClassifier::from_tags(comments);
        let selection = Selection::single(range(0, 9));
        assert!(is_fully_commented(&lines, &selection, &all_comments));

        let mixed = StaticClassifier::from_tags(
            comments
                .into_iter()
                .chain([(range(10, 13), "keyword")]),
        );
        let selection = Selection::single(range(0, 13));
        assert!(!is_fully_commented(&lines, &selection, &mixed));
        assert_eq!(
            toggle_comment_action(&lines, &selection, &mixed),
            ToggleCommentAction::Comment
        );
    }

    #[test]
    fn empty_selections_and_blank_lines_are_not_commented() {
        let text = "// a\n\n";
        let lines = LineIndex::new(text);
        let classifier = StaticClassifier::from_tags([(range(0, 4), "comment")]);

        assert!(!is_fully_commented(&lines, &Selection::default(), &classifier));
        assert!(!is_fully_commented(
            &lines,
            &Selection::caret(TextSize::from(5)),
            &classifier
        ));
        assert!(is_fully_commented(
            &lines,
            &Selection::caret(TextSize::from(2)),
            &classifier
        ));
    }
}
