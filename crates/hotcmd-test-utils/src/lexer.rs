use hotcmd_syntax::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Splits `input` into tokens; concatenating every token's text yields `input`.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        let (kind, len) = next_token(rest, bytes[pos]);
        tokens.push(Token {
            kind,
            text: &input[pos..pos + len],
        });
        pos += len;
    }

    tokens
}

fn next_token(rest: &str, first: u8) -> (SyntaxKind, usize) {
    match first {
        b' ' | b'\t' => (
            SyntaxKind::Whitespace,
            run_len(rest, |c| c == ' ' || c == '\t'),
        ),
        b'\r' if rest.starts_with("\r\n") => (SyntaxKind::Newline, 2),
        b'\r' | b'\n' => (SyntaxKind::Newline, 1),
        b'/' if rest.starts_with("///") => (SyntaxKind::DocComment, line_len(rest)),
        b'/' if rest.starts_with("//") => (SyntaxKind::LineComment, line_len(rest)),
        b'/' if rest.starts_with("/*") => {
            let len = rest[2..].find("*/").map_or(rest.len(), |idx| idx + 4);
            (SyntaxKind::BlockComment, len)
        }
        b'"' => (SyntaxKind::StringLiteral, quoted_len(rest, '"')),
        b'\'' => (SyntaxKind::CharLiteral, quoted_len(rest, '\'')),
        b'0'..=b'9' => (
            SyntaxKind::NumericLiteral,
            run_len(rest, |c| c.is_ascii_alphanumeric() || c == '.' || c == '_'),
        ),
        _ => {
            let ch = rest.chars().next().unwrap_or_default();
            if ch.is_alphabetic() || ch == '_' {
                let len = run_len(rest, |c| c.is_alphanumeric() || c == '_');
                let kind = SyntaxKind::from_keyword(&rest[..len]).unwrap_or(SyntaxKind::Identifier);
                (kind, len)
            } else {
                let kind = SyntaxKind::from_punctuation(ch).unwrap_or(SyntaxKind::Error);
                (kind, ch.len_utf8())
            }
        }
    }
}

fn run_len(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(idx, _)| idx)
}

fn line_len(text: &str) -> usize {
    text.find(['\r', '\n']).unwrap_or(text.len())
}

fn quoted_len(text: &str, quote: char) -> usize {
    let mut escaped = false;
    for (idx, c) in text.char_indices().skip(1) {
        match c {
            '\r' | '\n' => return idx,
            '\\' if !escaped => escaped = true,
            c if c == quote && !escaped => return idx + c.len_utf8(),
            _ => escaped = false,
        }
    }
    text.len()
}
