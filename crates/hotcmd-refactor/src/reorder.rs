use hotcmd_syntax::{green, SyntaxNode, SyntaxTree};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReorderError {
    #[error("member has no parent")]
    Detached,
    #[error("members do not share a parent")]
    NotSiblings,
    #[error("cannot swap a member with itself")]
    SameMember,
    #[error("member does not belong to the tree")]
    ForeignNode,
}

/// Exchanges the positions of two sibling members.
///
/// Everything a member owns moves with it, including the doc comments and
/// blank lines in front of it and a comment trailing it on the same line. The
/// order of `a` and `b` does not matter. Only the common parent and its
/// ancestors are rebuilt; `tree` itself is left untouched.
pub fn swap_members(
    tree: &SyntaxTree,
    a: &SyntaxNode,
    b: &SyntaxNode,
) -> Result<SyntaxTree, ReorderError> {
    let (Some(parent), Some(other_parent)) = (a.parent(), b.parent()) else {
        return Err(ReorderError::Detached);
    };
    if !tree.owns(a) || !tree.owns(b) {
        return Err(ReorderError::ForeignNode);
    }
    if parent != other_parent {
        return Err(ReorderError::NotSiblings);
    }
    if a == b {
        return Err(ReorderError::SameMember);
    }

    let (first, second) = (a.index(), b.index());
    let new_parent = green::with_children(&parent.green(), |children| {
        children.swap(first, second);
    });
    tracing::trace!(parent = ?parent.kind(), first, second, "swapping members");
    tree.replace_node(&parent, new_parent)
        .ok_or(ReorderError::ForeignNode)
}
