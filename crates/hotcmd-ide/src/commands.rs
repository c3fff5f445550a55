use hotcmd_core::{LineIndex, Selection, TextSize};
use hotcmd_refactor::swap_members;
use hotcmd_syntax::{
    find_member_declaration_at, find_next_member_declaration, find_previous_member_declaration,
    SyntaxNode, SyntaxTree,
};

use crate::classification::{toggle_comment_action, Classifier, ToggleCommentAction};

#[derive(Clone, Copy, Debug)]
enum Direction {
    Up,
    Down,
}

/// Swaps the member at `caret` with the member after it.
///
/// `None` when there is nothing to do: the caret is not inside a member, the
/// member is the last one of its type, or the next member lives elsewhere.
pub fn move_member_down(tree: &SyntaxTree, caret: TextSize) -> Option<SyntaxTree> {
    move_member(tree, caret, Direction::Down)
}

/// Swaps the member at `caret` with the member before it.
pub fn move_member_up(tree: &SyntaxTree, caret: TextSize) -> Option<SyntaxTree> {
    move_member(tree, caret, Direction::Up)
}

fn move_member(tree: &SyntaxTree, caret: TextSize, direction: Direction) -> Option<SyntaxTree> {
    let Some(current) = find_member_declaration_at(tree, caret) else {
        tracing::debug!(caret = u32::from(caret), "no member declaration at caret");
        return None;
    };
    let parent = current.parent()?;

    let neighbor = match direction {
        Direction::Down => find_next_member_declaration(tree, &current),
        Direction::Up => find_previous_member_declaration(tree, &current),
    };
    let Some(neighbor) = neighbor.filter(|node| is_child_of(node, &parent)) else {
        tracing::debug!(?direction, "no sibling member to swap with");
        return None;
    };

    match swap_members(tree, &current, &neighbor) {
        Ok(tree) => Some(tree),
        Err(err) => {
            tracing::debug!(?direction, %err, "member swap declined");
            None
        }
    }
}

fn is_child_of(node: &SyntaxNode, parent: &SyntaxNode) -> bool {
    node.parent().as_ref() == Some(parent)
}

/// Decides whether the host should comment or uncomment `selection`.
pub fn toggle_comment<C: Classifier + ?Sized>(
    lines: &LineIndex,
    selection: &Selection,
    classifier: &C,
) -> ToggleCommentAction {
    let action = toggle_comment_action(lines, selection, classifier);
    tracing::trace!(?action, ranges = selection.ranges().len(), "toggle comment");
    action
}
