use rowan::Language;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Unified syntax kind for both tokens and nodes.
///
/// The token kinds cover the lexical surface of the C# subset HotCommands edits;
/// anything the host's lexer cannot map is carried as [`SyntaxKind::Error`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr,
)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Trivia ---
    Whitespace,
    /// `\n`, `\r\n` or a lone `\r`.
    Newline,
    LineComment,
    BlockComment,
    /// `///` documentation comment (a single line).
    DocComment,

    // --- Identifiers & literals ---
    Identifier,
    NumericLiteral,
    StringLiteral,
    CharLiteral,

    // --- Keywords ---
    AbstractKw,
    BoolKw,
    ByteKw,
    CharKw,
    ClassKw,
    ConstKw,
    DecimalKw,
    DoubleKw,
    ElseKw,
    EnumKw,
    FalseKw,
    FloatKw,
    ForKw,
    ForeachKw,
    IfKw,
    InterfaceKw,
    InternalKw,
    IntKw,
    LongKw,
    NamespaceKw,
    NewKw,
    NullKw,
    ObjectKw,
    OverrideKw,
    PrivateKw,
    ProtectedKw,
    PublicKw,
    ReadonlyKw,
    ReturnKw,
    SealedKw,
    StaticKw,
    StringKw,
    StructKw,
    ThisKw,
    TrueKw,
    UsingKw,
    VirtualKw,
    VoidKw,
    WhileKw,

    // --- Punctuation ---
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Less,
    Greater,
    Semicolon,
    Comma,
    Dot,
    Eq,
    Question,
    Colon,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Amp,
    Pipe,
    Caret,
    Tilde,

    // --- Nodes ---
    CompilationUnit,
    UsingDirective,
    NamespaceDeclaration,
    /// Qualified name, e.g. `System.Collections.Generic`.
    Name,
    ClassDeclaration,
    Modifiers,
    Type,
    FieldDeclaration,
    VariableDeclarator,
    MethodDeclaration,
    PropertyDeclaration,
    AccessorList,
    ConstructorDeclaration,
    ParameterList,
    Parameter,
    Block,
    Statement,
    AssignmentExpression,
    MemberAccessExpression,
    ThisExpression,
    NameRef,

    Error,

    #[doc(hidden)]
    __Last,
}

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace
                | SyntaxKind::Newline
                | SyntaxKind::LineComment
                | SyntaxKind::BlockComment
                | SyntaxKind::DocComment
        )
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            SyntaxKind::LineComment | SyntaxKind::BlockComment | SyntaxKind::DocComment
        )
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (SyntaxKind::AbstractKw as u16..=SyntaxKind::WhileKw as u16).contains(&(self as u16))
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        (SyntaxKind::LBrace as u16..=SyntaxKind::Tilde as u16).contains(&(self as u16))
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::CharLiteral
                | SyntaxKind::TrueKw
                | SyntaxKind::FalseKw
                | SyntaxKind::NullKw
        )
    }

    /// Whether the kind is a token kind (as opposed to a node kind).
    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) < SyntaxKind::CompilationUnit as u16 || self == SyntaxKind::Error
    }

    #[inline]
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKw
                | SyntaxKind::ConstKw
                | SyntaxKind::InternalKw
                | SyntaxKind::OverrideKw
                | SyntaxKind::PrivateKw
                | SyntaxKind::ProtectedKw
                | SyntaxKind::PublicKw
                | SyntaxKind::ReadonlyKw
                | SyntaxKind::SealedKw
                | SyntaxKind::StaticKw
                | SyntaxKind::VirtualKw
        )
    }

    /// Keyword kinds that name a predefined type (`int`, `string`, ...).
    #[inline]
    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::BoolKw
                | SyntaxKind::ByteKw
                | SyntaxKind::CharKw
                | SyntaxKind::DecimalKw
                | SyntaxKind::DoubleKw
                | SyntaxKind::FloatKw
                | SyntaxKind::IntKw
                | SyntaxKind::LongKw
                | SyntaxKind::ObjectKw
                | SyntaxKind::StringKw
                | SyntaxKind::VoidKw
        )
    }

    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "abstract" => SyntaxKind::AbstractKw,
            "bool" => SyntaxKind::BoolKw,
            "byte" => SyntaxKind::ByteKw,
            "char" => SyntaxKind::CharKw,
            "class" => SyntaxKind::ClassKw,
            "const" => SyntaxKind::ConstKw,
            "decimal" => SyntaxKind::DecimalKw,
            "double" => SyntaxKind::DoubleKw,
            "else" => SyntaxKind::ElseKw,
            "enum" => SyntaxKind::EnumKw,
            "false" => SyntaxKind::FalseKw,
            "float" => SyntaxKind::FloatKw,
            "for" => SyntaxKind::ForKw,
            "foreach" => SyntaxKind::ForeachKw,
            "if" => SyntaxKind::IfKw,
            "interface" => SyntaxKind::InterfaceKw,
            "internal" => SyntaxKind::InternalKw,
            "int" => SyntaxKind::IntKw,
            "long" => SyntaxKind::LongKw,
            "namespace" => SyntaxKind::NamespaceKw,
            "new" => SyntaxKind::NewKw,
            "null" => SyntaxKind::NullKw,
            "object" => SyntaxKind::ObjectKw,
            "override" => SyntaxKind::OverrideKw,
            "private" => SyntaxKind::PrivateKw,
            "protected" => SyntaxKind::ProtectedKw,
            "public" => SyntaxKind::PublicKw,
            "readonly" => SyntaxKind::ReadonlyKw,
            "return" => SyntaxKind::ReturnKw,
            "sealed" => SyntaxKind::SealedKw,
            "static" => SyntaxKind::StaticKw,
            "string" => SyntaxKind::StringKw,
            "struct" => SyntaxKind::StructKw,
            "this" => SyntaxKind::ThisKw,
            "true" => SyntaxKind::TrueKw,
            "using" => SyntaxKind::UsingKw,
            "virtual" => SyntaxKind::VirtualKw,
            "void" => SyntaxKind::VoidKw,
            "while" => SyntaxKind::WhileKw,
            _ => return None,
        })
    }

    pub fn from_punctuation(ch: char) -> Option<SyntaxKind> {
        Some(match ch {
            '{' => SyntaxKind::LBrace,
            '}' => SyntaxKind::RBrace,
            '(' => SyntaxKind::LParen,
            ')' => SyntaxKind::RParen,
            '[' => SyntaxKind::LBracket,
            ']' => SyntaxKind::RBracket,
            '<' => SyntaxKind::Less,
            '>' => SyntaxKind::Greater,
            ';' => SyntaxKind::Semicolon,
            ',' => SyntaxKind::Comma,
            '.' => SyntaxKind::Dot,
            '=' => SyntaxKind::Eq,
            '?' => SyntaxKind::Question,
            ':' => SyntaxKind::Colon,
            '+' => SyntaxKind::Plus,
            '-' => SyntaxKind::Minus,
            '*' => SyntaxKind::Star,
            '/' => SyntaxKind::Slash,
            '%' => SyntaxKind::Percent,
            '!' => SyntaxKind::Bang,
            '&' => SyntaxKind::Amp,
            '|' => SyntaxKind::Pipe,
            '^' => SyntaxKind::Caret,
            '~' => SyntaxKind::Tilde,
            _ => return None,
        })
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(value: SyntaxKind) -> Self {
        rowan::SyntaxKind(value as u16)
    }
}

/// Rowan language marker for the C# subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharpLanguage {}

impl Language for CSharpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        if raw.0 < SyntaxKind::__Last as u16 {
            // SAFETY: `SyntaxKind` is `repr(u16)` with contiguous discriminants and
            // the value is below `__Last`.
            unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
        } else {
            SyntaxKind::Error
        }
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_ranges_match_classification() {
        assert!(SyntaxKind::AbstractKw.is_keyword());
        assert!(SyntaxKind::WhileKw.is_keyword());
        assert!(!SyntaxKind::Identifier.is_keyword());
        assert!(!SyntaxKind::LBrace.is_keyword());
        assert!(SyntaxKind::LBrace.is_punctuation());
        assert!(SyntaxKind::Tilde.is_punctuation());
        assert!(!SyntaxKind::CompilationUnit.is_punctuation());
        assert!(SyntaxKind::Semicolon.is_token());
        assert!(!SyntaxKind::ClassDeclaration.is_token());
    }

    #[test]
    fn raw_kind_round_trips() {
        for kind in [
            SyntaxKind::Whitespace,
            SyntaxKind::ThisKw,
            SyntaxKind::ClassDeclaration,
            SyntaxKind::Error,
        ] {
            assert_eq!(CSharpLanguage::kind_from_raw(kind.into()), kind);
        }
        assert_eq!(
            CSharpLanguage::kind_from_raw(rowan::SyntaxKind(u16::MAX)),
            SyntaxKind::Error
        );
    }

    #[test]
    fn keywords_and_punctuation_are_recognised() {
        assert_eq!(SyntaxKind::from_keyword("this"), Some(SyntaxKind::ThisKw));
        assert_eq!(SyntaxKind::from_keyword("name"), None);
        assert_eq!(SyntaxKind::from_punctuation(';'), Some(SyntaxKind::Semicolon));
        assert_eq!(SyntaxKind::from_punctuation('#'), None);
    }
}
