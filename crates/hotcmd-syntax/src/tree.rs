use rowan::GreenNode;

use crate::syntax_kind::CSharpLanguage;
use crate::{TextRange, TextSize};

pub type SyntaxNode = rowan::SyntaxNode<CSharpLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CSharpLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CSharpLanguage>;

/// An immutable syntax tree: the green root that owns every token's text.
///
/// Cloning is cheap (the green tree is reference counted), and edits never
/// touch an existing tree; they return a new one that shares all unaffected
/// subtrees with the old.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxTree {
    green: GreenNode,
}

impl SyntaxTree {
    pub fn new(green: GreenNode) -> Self {
        Self { green }
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// A fresh red root for navigation (parents, siblings, offsets).
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn text(&self) -> String {
        self.root().text().to_string()
    }

    pub fn text_len(&self) -> TextSize {
        self.green.text_len()
    }

    /// Returns the smallest node whose range contains the empty range at `offset`.
    ///
    /// Child ranges are treated as half-open, so an offset on the boundary of
    /// two siblings resolves to the second one. The root additionally accepts
    /// `offset == len`. Returns `None` only when `offset` lies past the end.
    pub fn find_node(&self, offset: TextSize) -> Option<SyntaxNode> {
        let root = self.root();
        if !root.text_range().contains_inclusive(offset) {
            return None;
        }

        let mut node = root;
        'descend: loop {
            for child in node.children() {
                if child.text_range().contains(offset) {
                    node = child;
                    continue 'descend;
                }
            }
            return Some(node);
        }
    }

    /// Returns the smallest node whose range contains all of `range`.
    ///
    /// Empty ranges behave exactly like [`SyntaxTree::find_node`].
    pub fn find_covering_node(&self, range: TextRange) -> Option<SyntaxNode> {
        if range.is_empty() {
            return self.find_node(range.start());
        }

        let root = self.root();
        if !root.text_range().contains_range(range) {
            return None;
        }

        let mut node = root;
        'descend: loop {
            for child in node.children() {
                if child.text_range().contains_range(range) {
                    node = child;
                    continue 'descend;
                }
            }
            return Some(node);
        }
    }

    /// Whether `node` was obtained by navigating this tree.
    ///
    /// Roots are compared by green pointer, so a node from another tree with
    /// the same text is not owned.
    pub fn owns(&self, node: &SyntaxNode) -> bool {
        let own: &rowan::GreenNodeData = &self.green;
        node.ancestors()
            .last()
            .is_some_and(|root| std::ptr::eq(&*root.green(), own))
    }

    /// Returns a new tree where the subtree at `old`'s position is `new`.
    ///
    /// Only the path from `old` to the root is rebuilt; every other subtree is
    /// shared with `self`. Identity is positional, so two textually identical
    /// siblings are never confused. Returns `None` if `old` is not part of this
    /// tree.
    pub fn replace_node(&self, old: &SyntaxNode, new: GreenNode) -> Option<SyntaxTree> {
        if !self.owns(old) {
            return None;
        }
        Some(SyntaxTree::new(old.replace_with(new)))
    }
}

impl From<GreenNode> for SyntaxTree {
    fn from(green: GreenNode) -> Self {
        Self::new(green)
    }
}
