use rowan::{GreenNode, GreenNodeData, NodeOrToken};

use crate::green::{self, GreenElement};
use crate::syntax_kind::SyntaxKind;
use crate::tree::{SyntaxNode, SyntaxToken};

fn tokens(node: &SyntaxNode) -> Vec<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .collect()
}

/// Trivia tokens in front of the node's first significant token.
pub fn leading_trivia(node: &SyntaxNode) -> Vec<SyntaxToken> {
    tokens(node)
        .into_iter()
        .take_while(|token| token.kind().is_trivia())
        .collect()
}

/// Trivia tokens after the node's last significant token, in source order.
pub fn trailing_trivia(node: &SyntaxNode) -> Vec<SyntaxToken> {
    let all = tokens(node);
    if all.iter().all(|token| token.kind().is_trivia()) {
        return Vec::new();
    }
    let mut trailing: Vec<SyntaxToken> = all
        .into_iter()
        .rev()
        .take_while(|token| token.kind().is_trivia())
        .collect();
    trailing.reverse();
    trailing
}

/// The node's text without its outer leading and trailing trivia.
pub fn significant_text(node: &SyntaxNode) -> String {
    let all = tokens(node);
    let Some(first) = all.iter().position(|token| !token.kind().is_trivia()) else {
        return String::new();
    };
    let last = all
        .iter()
        .rposition(|token| !token.kind().is_trivia())
        .unwrap_or(first);
    all[first..=last].iter().map(|token| token.text()).collect()
}

/// The line break and indentation directly in front of the node's first
/// significant token.
///
/// Comments and blank lines further up are not included. When the node does
/// not start its line, only the whitespace between it and the previous token
/// on that line is returned.
pub fn line_trivia(node: &SyntaxNode) -> String {
    let leading = leading_trivia(node);
    let start = leading
        .iter()
        .rposition(|token| token.kind() == SyntaxKind::Newline || token.kind().is_comment())
        .map(|idx| {
            if leading[idx].kind() == SyntaxKind::Newline {
                idx
            } else {
                idx + 1
            }
        })
        .unwrap_or(0);
    leading[start..].iter().map(|token| token.text()).collect()
}

#[derive(Clone, Copy)]
enum Edge {
    Start,
    End,
}

/// Copy of `node` without outer leading and trailing trivia.
///
/// The trivia may sit arbitrarily deep along the first/last spine of the
/// subtree; nodes left without any significant token are dropped.
pub fn strip_trivia(node: &GreenNodeData) -> GreenNode {
    let without_leading = strip_edge(node, Edge::Start);
    strip_edge(&without_leading, Edge::End)
}

fn strip_edge(node: &GreenNodeData, edge: Edge) -> GreenNode {
    green::with_children(node, |children| loop {
        let idx = match edge {
            Edge::Start => 0,
            Edge::End => match children.len().checked_sub(1) {
                Some(idx) => idx,
                None => break,
            },
        };
        let Some(child) = children.get(idx) else {
            break;
        };
        match child {
            NodeOrToken::Token(token) if green::kind_of(token.kind()).is_trivia() => {
                children.remove(idx);
            }
            NodeOrToken::Node(inner) if !green::has_significant_tokens(inner) => {
                children.remove(idx);
            }
            NodeOrToken::Node(inner) => {
                let stripped: GreenElement = NodeOrToken::Node(strip_edge(inner, edge));
                children[idx] = stripped;
                break;
            }
            NodeOrToken::Token(_) => break,
        }
    })
}
