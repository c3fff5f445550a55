//! Helpers for assembling and rewriting green (immutable, shared) subtrees.

use rowan::{GreenNode, GreenNodeData, GreenToken, GreenTokenData, Language, NodeOrToken};

use crate::syntax_kind::{CSharpLanguage, SyntaxKind};

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

pub fn token(kind: SyntaxKind, text: &str) -> GreenElement {
    NodeOrToken::Token(GreenToken::new(kind.into(), text))
}

pub fn node(kind: SyntaxKind, children: impl IntoIterator<Item = GreenElement>) -> GreenNode {
    let children: Vec<GreenElement> = children.into_iter().collect();
    GreenNode::new(kind.into(), children)
}

#[inline]
pub fn kind_of(raw: rowan::SyntaxKind) -> SyntaxKind {
    CSharpLanguage::kind_from_raw(raw)
}

pub fn element_kind(element: &GreenElement) -> SyntaxKind {
    match element {
        NodeOrToken::Node(node) => kind_of(node.kind()),
        NodeOrToken::Token(token) => kind_of(token.kind()),
    }
}

/// Owned copies of `node`'s direct children (cheap: reference-count bumps).
pub fn children(node: &GreenNodeData) -> Vec<GreenElement> {
    node.children()
        .map(|child| match child {
            NodeOrToken::Node(node) => NodeOrToken::Node(node.to_owned()),
            NodeOrToken::Token(token) => NodeOrToken::Token(token.to_owned()),
        })
        .collect()
}

/// Rebuilds `node` with the same kind after `edit` rewrites its child list.
pub fn with_children(node: &GreenNodeData, edit: impl FnOnce(&mut Vec<GreenElement>)) -> GreenNode {
    let mut elements = children(node);
    edit(&mut elements);
    GreenNode::new(node.kind(), elements)
}

/// Whether the subtree contains any non-trivia token.
pub fn has_significant_tokens(node: &GreenNodeData) -> bool {
    node.children().any(|child| match child {
        NodeOrToken::Node(node) => has_significant_tokens(node),
        NodeOrToken::Token(token) => !is_trivia_token(token),
    })
}

pub(crate) fn is_trivia_token(token: &GreenTokenData) -> bool {
    kind_of(token.kind()).is_trivia()
}
