use crate::syntax_kind::SyntaxKind;
use crate::tree::{SyntaxNode, SyntaxTree};
use crate::TextSize;

/// Whether `node` declares a member of a type.
///
/// Members are fields, methods, properties, constructors, and classes nested
/// directly inside another class. Top-level types (in a compilation unit or a
/// namespace) are not members.
pub fn is_member_declaration(node: &SyntaxNode) -> bool {
    match node.kind() {
        SyntaxKind::FieldDeclaration
        | SyntaxKind::MethodDeclaration
        | SyntaxKind::PropertyDeclaration
        | SyntaxKind::ConstructorDeclaration => true,
        SyntaxKind::ClassDeclaration => node
            .parent()
            .is_some_and(|parent| parent.kind() == SyntaxKind::ClassDeclaration),
        _ => false,
    }
}

/// Returns the innermost member declaration enclosing `offset`.
///
/// `None` when the offset is outside the tree or not inside any member, e.g.
/// in the using section or on a top-level class header.
pub fn find_member_declaration_at(tree: &SyntaxTree, offset: TextSize) -> Option<SyntaxNode> {
    let node = tree.find_node(offset)?;
    let member = node.ancestors().find(is_member_declaration);
    tracing::trace!(
        offset = u32::from(offset),
        kind = ?member.as_ref().map(|m| m.kind()),
        "member declaration lookup"
    );
    member
}

/// Returns the member declaration that follows `current`.
///
/// The lookup happens one past the end of `current`, which skips the boundary
/// and lands inside whatever comes next. Callers must still check that the
/// result shares `current`'s parent: past the last member the lookup finds the
/// containing type's closing brace (no member) or an unrelated declaration.
pub fn find_next_member_declaration(tree: &SyntaxTree, current: &SyntaxNode) -> Option<SyntaxNode> {
    let offset = current.text_range().end() + TextSize::from(1);
    find_member_declaration_at(tree, offset)
}

/// Returns the member declaration that precedes `current`.
///
/// Looks one before the start of `current`, which is inside the previous
/// sibling's last token when there is one.
pub fn find_previous_member_declaration(
    tree: &SyntaxTree,
    current: &SyntaxNode,
) -> Option<SyntaxNode> {
    let start = current.text_range().start();
    let offset = start.checked_sub(TextSize::from(1))?;
    find_member_declaration_at(tree, offset)
}
