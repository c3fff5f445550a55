//! Syntax tree primitives for HotCommands.
//!
//! Trees are rowan green/red trees over [`SyntaxKind`]. The green layer is
//! immutable and structurally shared, so every edit produces a new
//! [`SyntaxTree`] while the old one stays valid. Parsing is not part of this
//! crate: hosts construct trees through [`TreeBuilder`].
//!
//! Trivia attachment follows one convention everywhere:
//! - whitespace, line breaks and comments in front of a token belong to the
//!   innermost node that starts at that token (leading trivia);
//! - comments on the same line after a member's last token belong to that
//!   member (trailing trivia), the line break itself does not.

pub mod ast;
mod builder;
pub mod green;
mod locator;
mod syntax_kind;
mod tree;
mod trivia;

pub use ast::AstNode;
pub use builder::{BuildError, TreeBuilder};
pub use locator::{
    find_member_declaration_at, find_next_member_declaration, find_previous_member_declaration,
    is_member_declaration,
};
pub use syntax_kind::{CSharpLanguage, SyntaxKind};
pub use tree::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree};
pub use trivia::{leading_trivia, line_trivia, significant_text, strip_trivia, trailing_trivia};

pub use hotcmd_core::{TextRange, TextSize};
