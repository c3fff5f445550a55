//! Recursive-descent reader that turns fixture source into a [`SyntaxTree`].
//!
//! Trivia is never eaten before a node is started, so whitespace and comments
//! in front of a token end up in the innermost node starting at that token.

use hotcmd_core::{TextRange, TextSize};
use hotcmd_syntax::{SyntaxKind, SyntaxTree, TreeBuilder};

use crate::lexer::{lex, Token};
use crate::markers::{extract_caret, extract_range};

/// Reads `text` into a syntax tree.
///
/// Panics if the reader produces an unbalanced tree, which would be a bug in
/// the reader rather than in the fixture: unknown input becomes `Error` nodes.
pub fn parse_fixture(text: &str) -> SyntaxTree {
    let tree = Reader::new(text)
        .parse()
        .finish()
        .expect("fixture reader produced an invalid tree");
    debug_assert_eq!(tree.text(), text);
    tree
}

/// Reads a fixture containing a `$0` caret marker.
pub fn fixture_with_caret(fixture: &str) -> (SyntaxTree, TextSize) {
    let (text, offset) = extract_caret(fixture);
    (parse_fixture(&text), offset)
}

/// Reads a fixture containing `/*start*/` and `/*end*/` markers.
pub fn fixture_with_range(fixture: &str) -> (SyntaxTree, TextRange) {
    let (text, range) = extract_range(fixture);
    (parse_fixture(&text), range)
}

struct Reader<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    builder: TreeBuilder,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            tokens: lex(input),
            pos: 0,
            builder: TreeBuilder::new(),
        }
    }

    fn parse(mut self) -> TreeBuilder {
        self.builder.start_node(SyntaxKind::CompilationUnit);
        loop {
            match self.current() {
                None => break,
                Some(SyntaxKind::UsingKw) => self.using_directive(),
                Some(SyntaxKind::NamespaceKw) => self.namespace_declaration(),
                Some(_) if self.at_class_start() => self.class_declaration(),
                Some(_) => self.error_token(),
            }
        }
        self.eat_trivia();
        self.builder.finish_node();
        self.builder
    }

    fn using_directive(&mut self) {
        self.builder.start_node(SyntaxKind::UsingDirective);
        self.bump();
        self.name();
        self.expect(SyntaxKind::Semicolon);
        self.builder.finish_node();
    }

    fn name(&mut self) {
        self.builder.start_node(SyntaxKind::Name);
        self.expect(SyntaxKind::Identifier);
        while self.at(SyntaxKind::Dot) && self.nth(1) == Some(SyntaxKind::Identifier) {
            self.bump();
            self.bump();
        }
        self.builder.finish_node();
    }

    fn namespace_declaration(&mut self) {
        self.builder.start_node(SyntaxKind::NamespaceDeclaration);
        self.bump();
        self.name();
        self.expect(SyntaxKind::LBrace);
        loop {
            match self.current() {
                None | Some(SyntaxKind::RBrace) => break,
                Some(SyntaxKind::UsingKw) => self.using_directive(),
                Some(_) if self.at_class_start() => self.class_declaration(),
                Some(_) => self.error_token(),
            }
        }
        self.expect(SyntaxKind::RBrace);
        self.builder.finish_node();
    }

    fn at_class_start(&self) -> bool {
        let idx = self.modifier_count();
        self.nth(idx) == Some(SyntaxKind::ClassKw)
    }

    fn class_declaration(&mut self) {
        self.builder.start_node(SyntaxKind::ClassDeclaration);
        self.modifiers();
        self.expect(SyntaxKind::ClassKw);
        self.expect(SyntaxKind::Identifier);
        if self.at(SyntaxKind::Colon) {
            while !matches!(self.current(), None | Some(SyntaxKind::LBrace)) {
                self.bump();
            }
        }
        self.expect(SyntaxKind::LBrace);
        loop {
            match self.current() {
                None | Some(SyntaxKind::RBrace) => break,
                Some(_) => self.member_declaration(),
            }
        }
        self.expect(SyntaxKind::RBrace);
        self.eat_trailing_trivia();
        self.builder.finish_node();
    }

    fn member_declaration(&mut self) {
        let idx = self.modifier_count();
        match self.nth(idx) {
            Some(SyntaxKind::ClassKw) => return self.class_declaration(),
            Some(SyntaxKind::Identifier) if self.nth(idx + 1) == Some(SyntaxKind::LParen) => {
                return self.constructor_declaration();
            }
            _ => {}
        }

        let Some(len) = self.type_len(idx) else {
            return self.error_token();
        };
        let name = idx + len;
        if self.nth(name) != Some(SyntaxKind::Identifier) {
            return self.error_token();
        }
        match self.nth(name + 1) {
            Some(SyntaxKind::LParen) => self.method_declaration(),
            Some(SyntaxKind::LBrace) => self.property_declaration(),
            _ => self.field_declaration(),
        }
    }

    fn modifier_count(&self) -> usize {
        let mut idx = 0;
        while self.nth(idx).is_some_and(SyntaxKind::is_modifier) {
            idx += 1;
        }
        idx
    }

    fn modifiers(&mut self) {
        if !self.current().is_some_and(SyntaxKind::is_modifier) {
            return;
        }
        self.builder.start_node(SyntaxKind::Modifiers);
        while self.current().is_some_and(SyntaxKind::is_modifier) {
            self.bump();
        }
        self.builder.finish_node();
    }

    /// Number of significant tokens of the type starting `idx` tokens ahead.
    fn type_len(&self, idx: usize) -> Option<usize> {
        let first = self.nth(idx)?;
        if first != SyntaxKind::Identifier && !first.is_predefined_type() {
            return None;
        }
        let mut end = idx + 1;
        loop {
            match self.nth(end) {
                Some(SyntaxKind::Dot) if self.nth(end + 1) == Some(SyntaxKind::Identifier) => {
                    end += 2;
                }
                Some(SyntaxKind::Less) => {
                    let mut depth = 0usize;
                    loop {
                        match self.nth(end)? {
                            SyntaxKind::Less => depth += 1,
                            SyntaxKind::Greater => depth -= 1,
                            _ => {}
                        }
                        end += 1;
                        if depth == 0 {
                            break;
                        }
                    }
                }
                Some(SyntaxKind::Question) => end += 1,
                Some(SyntaxKind::LBracket) if self.nth(end + 1) == Some(SyntaxKind::RBracket) => {
                    end += 2;
                }
                _ => break,
            }
        }
        Some(end - idx)
    }

    fn ty(&mut self) {
        let len = self.type_len(0).unwrap_or(1);
        self.builder.start_node(SyntaxKind::Type);
        for _ in 0..len {
            self.bump();
        }
        self.builder.finish_node();
    }

    fn field_declaration(&mut self) {
        self.builder.start_node(SyntaxKind::FieldDeclaration);
        self.modifiers();
        self.ty();
        loop {
            self.variable_declarator();
            if !self.at(SyntaxKind::Comma) {
                break;
            }
            self.bump();
        }
        self.expect(SyntaxKind::Semicolon);
        self.eat_trailing_trivia();
        self.builder.finish_node();
    }

    fn variable_declarator(&mut self) {
        self.builder.start_node(SyntaxKind::VariableDeclarator);
        self.expect(SyntaxKind::Identifier);
        if self.at(SyntaxKind::Eq) {
            self.bump();
            self.bump_until_at_depth_zero(&[SyntaxKind::Comma, SyntaxKind::Semicolon]);
        }
        self.builder.finish_node();
    }

    fn method_declaration(&mut self) {
        self.builder.start_node(SyntaxKind::MethodDeclaration);
        self.modifiers();
        self.ty();
        self.expect(SyntaxKind::Identifier);
        self.parameter_list();
        self.body();
        self.eat_trailing_trivia();
        self.builder.finish_node();
    }

    fn property_declaration(&mut self) {
        self.builder.start_node(SyntaxKind::PropertyDeclaration);
        self.modifiers();
        self.ty();
        self.expect(SyntaxKind::Identifier);

        self.builder.start_node(SyntaxKind::AccessorList);
        let mut depth = 0usize;
        while let Some(kind) = self.current() {
            self.bump();
            match kind {
                SyntaxKind::LBrace => depth += 1,
                SyntaxKind::RBrace => depth = depth.saturating_sub(1),
                _ => {}
            }
            if depth == 0 {
                break;
            }
        }
        self.builder.finish_node();

        if self.at(SyntaxKind::Eq) {
            self.bump_until_at_depth_zero(&[SyntaxKind::Semicolon]);
            self.expect(SyntaxKind::Semicolon);
        }
        self.eat_trailing_trivia();
        self.builder.finish_node();
    }

    fn constructor_declaration(&mut self) {
        self.builder.start_node(SyntaxKind::ConstructorDeclaration);
        self.modifiers();
        self.expect(SyntaxKind::Identifier);
        self.parameter_list();
        if self.at(SyntaxKind::Colon) {
            while !matches!(
                self.current(),
                None | Some(SyntaxKind::LBrace) | Some(SyntaxKind::Semicolon)
            ) {
                self.bump();
            }
        }
        self.body();
        self.eat_trailing_trivia();
        self.builder.finish_node();
    }

    fn body(&mut self) {
        if self.at(SyntaxKind::LBrace) {
            self.block();
        } else {
            self.expect(SyntaxKind::Semicolon);
        }
    }

    fn parameter_list(&mut self) {
        self.builder.start_node(SyntaxKind::ParameterList);
        self.expect(SyntaxKind::LParen);
        while self.type_len(0).is_some() {
            self.parameter();
            if !self.at(SyntaxKind::Comma) {
                break;
            }
            self.bump();
        }
        self.expect(SyntaxKind::RParen);
        self.builder.finish_node();
    }

    fn parameter(&mut self) {
        self.builder.start_node(SyntaxKind::Parameter);
        self.ty();
        self.expect(SyntaxKind::Identifier);
        if self.at(SyntaxKind::Eq) {
            self.bump_until_at_depth_zero(&[SyntaxKind::Comma, SyntaxKind::RParen]);
        }
        self.builder.finish_node();
    }

    fn block(&mut self) {
        self.builder.start_node(SyntaxKind::Block);
        self.expect(SyntaxKind::LBrace);
        loop {
            match self.current() {
                None | Some(SyntaxKind::RBrace) => break,
                Some(_) => self.statement(),
            }
        }
        self.expect(SyntaxKind::RBrace);
        self.builder.finish_node();
    }

    /// A statement runs to the next `;` or block-closing `}` at nesting depth
    /// zero. `if (..) { } else { }` stays a single statement.
    fn statement(&mut self) {
        self.builder.start_node(SyntaxKind::Statement);
        let mut depth = 0usize;
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::LBrace | SyntaxKind::LParen | SyntaxKind::LBracket => depth += 1,
                SyntaxKind::RBrace if depth == 0 => break,
                SyntaxKind::RBrace | SyntaxKind::RParen | SyntaxKind::RBracket => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.bump();
            if depth == 0 {
                match kind {
                    SyntaxKind::Semicolon => break,
                    SyntaxKind::RBrace if !self.at(SyntaxKind::ElseKw) => break,
                    _ => {}
                }
            }
        }
        self.builder.finish_node();
    }

    fn error_token(&mut self) {
        self.builder.start_node(SyntaxKind::Error);
        self.bump();
        self.builder.finish_node();
    }

    fn bump_until_at_depth_zero(&mut self, stop: &[SyntaxKind]) {
        let mut depth = 0usize;
        while let Some(kind) = self.current() {
            if depth == 0 && stop.contains(&kind) {
                break;
            }
            match kind {
                SyntaxKind::LBrace | SyntaxKind::LParen | SyntaxKind::LBracket => depth += 1,
                SyntaxKind::RBrace | SyntaxKind::RParen | SyntaxKind::RBracket => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Attaches a same-line comment run after a member's last token to the
    /// member. The line break stays outside.
    fn eat_trailing_trivia(&mut self) {
        let mut end = self.pos;
        let mut saw_comment = false;
        while let Some(token) = self.tokens.get(end) {
            match token.kind {
                SyntaxKind::Whitespace => {}
                kind if kind.is_comment() => saw_comment = true,
                _ => break,
            }
            end += 1;
        }
        let at_line_end = self
            .tokens
            .get(end)
            .map_or(true, |token| token.kind == SyntaxKind::Newline);
        if saw_comment && at_line_end {
            while self.pos < end {
                self.bump_any();
            }
        }
    }

    fn nth(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens[self.pos..]
            .iter()
            .filter(|token| !token.kind.is_trivia())
            .nth(n)
            .map(|token| token.kind)
    }

    fn current(&self) -> Option<SyntaxKind> {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    fn eat_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .is_some_and(|token| token.kind.is_trivia())
        {
            self.bump_any();
        }
    }

    fn bump(&mut self) {
        self.eat_trivia();
        self.bump_any();
    }

    fn bump_any(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind, token.text);
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            tracing::trace!(expected = ?kind, found = ?self.current(), "fixture reader mismatch");
            false
        }
    }
}
