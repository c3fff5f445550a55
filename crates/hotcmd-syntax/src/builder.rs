use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};
use thiserror::Error;

use crate::syntax_kind::SyntaxKind;
use crate::tree::SyntaxTree;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("`finish_node` called without a matching `start_node`")]
    UnbalancedFinish,
    #[error("{0} node(s) still open when finishing the tree")]
    UnclosedNodes(usize),
    #[error("token `{0:?}` emitted outside of any node")]
    TokenOutsideNode(SyntaxKind),
    #[error("tree has no root node")]
    NoRoot,
    #[error("tree has more than one root node")]
    MultipleRoots,
    #[error("`{0:?}` is a node kind and cannot be used for a token")]
    NodeKindAsToken(SyntaxKind),
}

/// Constructs syntax trees for the editing engine.
///
/// Thin wrapper over rowan's [`GreenNodeBuilder`] that reports structural
/// misuse as [`BuildError`] instead of panicking, since trees come from an
/// external collaborator.
#[derive(Default)]
pub struct TreeBuilder {
    inner: GreenNodeBuilder<'static>,
    depth: usize,
    roots: usize,
    error: Option<BuildError>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        if self.depth == 0 {
            self.roots += 1;
        }
        self.depth += 1;
        self.inner.start_node(kind.into());
    }

    /// Marks the current position so a node can later be wrapped around
    /// everything emitted after it (see [`TreeBuilder::start_node_at`]).
    pub fn checkpoint(&self) -> Checkpoint {
        self.inner.checkpoint()
    }

    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        if self.depth == 0 {
            self.record(BuildError::NoRoot);
            return;
        }
        self.depth += 1;
        self.inner.start_node_at(checkpoint, kind.into());
    }

    pub fn token(&mut self, kind: SyntaxKind, text: &str) {
        if !kind.is_token() {
            self.record(BuildError::NodeKindAsToken(kind));
            return;
        }
        if self.depth == 0 {
            self.record(BuildError::TokenOutsideNode(kind));
            return;
        }
        self.inner.token(kind.into(), text);
    }

    pub fn finish_node(&mut self) {
        if self.depth == 0 {
            self.record(BuildError::UnbalancedFinish);
            return;
        }
        self.depth -= 1;
        self.inner.finish_node();
    }

    /// Finishes construction and returns the green root.
    pub fn finish_green(self) -> Result<GreenNode, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.depth != 0 {
            return Err(BuildError::UnclosedNodes(self.depth));
        }
        match self.roots {
            0 => Err(BuildError::NoRoot),
            1 => Ok(self.inner.finish()),
            _ => Err(BuildError::MultipleRoots),
        }
    }

    pub fn finish(self) -> Result<SyntaxTree, BuildError> {
        self.finish_green().map(SyntaxTree::new)
    }

    fn record(&mut self, err: BuildError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_lossless_tree() {
        let mut builder = TreeBuilder::new();
        builder.start_node(SyntaxKind::CompilationUnit);
        builder.start_node(SyntaxKind::UsingDirective);
        builder.token(SyntaxKind::UsingKw, "using");
        builder.token(SyntaxKind::Whitespace, " ");
        builder.start_node(SyntaxKind::Name);
        builder.token(SyntaxKind::Identifier, "System");
        builder.finish_node();
        builder.token(SyntaxKind::Semicolon, ";");
        builder.finish_node();
        builder.token(SyntaxKind::Newline, "\n");
        builder.finish_node();

        let tree = builder.finish().unwrap();
        assert_eq!(tree.text(), "using System;\n");
        assert_eq!(tree.root().kind(), SyntaxKind::CompilationUnit);
    }

    #[test]
    fn reports_unbalanced_finish() {
        let mut builder = TreeBuilder::new();
        builder.start_node(SyntaxKind::CompilationUnit);
        builder.finish_node();
        builder.finish_node();
        assert_eq!(builder.finish().unwrap_err(), BuildError::UnbalancedFinish);
    }

    #[test]
    fn reports_unclosed_and_missing_roots() {
        let mut builder = TreeBuilder::new();
        builder.start_node(SyntaxKind::CompilationUnit);
        builder.start_node(SyntaxKind::ClassDeclaration);
        builder.finish_node();
        assert_eq!(builder.finish().unwrap_err(), BuildError::UnclosedNodes(1));

        assert_eq!(TreeBuilder::new().finish().unwrap_err(), BuildError::NoRoot);

        let mut builder = TreeBuilder::new();
        builder.start_node(SyntaxKind::CompilationUnit);
        builder.finish_node();
        builder.start_node(SyntaxKind::CompilationUnit);
        builder.finish_node();
        assert_eq!(builder.finish().unwrap_err(), BuildError::MultipleRoots);
    }

    #[test]
    fn rejects_tokens_outside_nodes() {
        let mut builder = TreeBuilder::new();
        builder.token(SyntaxKind::Identifier, "x");
        assert_eq!(
            builder.finish().unwrap_err(),
            BuildError::TokenOutsideNode(SyntaxKind::Identifier)
        );
    }
}
