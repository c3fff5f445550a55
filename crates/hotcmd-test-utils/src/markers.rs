use hotcmd_core::{TextRange, TextSize};

/// Caret marker used in fixtures.
pub const CARET_MARKER: &str = "$0";

/// Strips the `$0` caret marker and returns the text plus the caret offset.
pub fn extract_caret(fixture: &str) -> (String, TextSize) {
    remove_marker(fixture, CARET_MARKER)
}

pub const RANGE_START_MARKER: &str = "/*start*/";
pub const RANGE_END_MARKER: &str = "/*end*/";

/// Strips `/*start*/` and `/*end*/` and returns the text plus the range they
/// enclosed, in offsets of the stripped text.
pub fn extract_range(fixture: &str) -> (String, TextRange) {
    let (text, start) = remove_marker(fixture, RANGE_START_MARKER);
    let (text, end) = remove_marker(&text, RANGE_END_MARKER);
    assert!(start <= end, "`{RANGE_END_MARKER}` precedes `{RANGE_START_MARKER}`");
    (text, TextRange::new(start, end))
}

fn remove_marker(fixture: &str, marker: &str) -> (String, TextSize) {
    let offset = fixture
        .find(marker)
        .unwrap_or_else(|| panic!("fixture missing `{marker}` marker"));
    let text = fixture.replacen(marker, "", 1);
    (text, TextSize::from(offset as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_marker_is_removed() {
        let (text, offset) = extract_caret("int $0x;");
        assert_eq!(text, "int x;");
        assert_eq!(offset, TextSize::from(4));
    }

    #[test]
    fn range_markers_are_removed() {
        let (text, range) = extract_range("a /*start*/bc/*end*/ d");
        assert_eq!(text, "a bc d");
        assert_eq!(&text[range], "bc");
    }
}
