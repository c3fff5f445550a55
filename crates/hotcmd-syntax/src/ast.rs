//! Typed views over [`SyntaxNode`]s.
//!
//! Wrappers are zero-cost: each holds the red node and exposes accessors for
//! the children the editing engine cares about.

use crate::syntax_kind::SyntaxKind;
use crate::tree::{SyntaxNode, SyntaxToken};

pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(syntax: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

pub mod support {
    use crate::ast::AstNode;
    use crate::syntax_kind::SyntaxKind;
    use crate::tree::{SyntaxNode, SyntaxToken};

    pub fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
        node.children().find_map(N::cast)
    }

    pub fn children<'a, N: AstNode + 'a>(node: &'a SyntaxNode) -> impl Iterator<Item = N> + 'a {
        node.children().filter_map(N::cast)
    }

    pub fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        node.children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|tok| tok.kind() == kind)
    }

    /// The first identifier among the node's direct children.
    pub fn ident_token(node: &SyntaxNode) -> Option<SyntaxToken> {
        token(node, SyntaxKind::Identifier)
    }
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$name
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                Self::can_cast(syntax.kind()).then_some(Self { syntax })
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

ast_node!(CompilationUnit);
ast_node!(NamespaceDeclaration);
ast_node!(ClassDeclaration);
ast_node!(Modifiers);
ast_node!(
    /// A type reference as written, e.g. `List<string>`.
    Type
);
ast_node!(
    /// `private string _a, _b;` holds one declarator per declared variable.
    FieldDeclaration
);
ast_node!(VariableDeclarator);
ast_node!(MethodDeclaration);
ast_node!(PropertyDeclaration);
ast_node!(ConstructorDeclaration);
ast_node!(ParameterList);
ast_node!(Parameter);
ast_node!(Block);
ast_node!(Statement);

impl CompilationUnit {
    pub fn namespaces(&self) -> impl Iterator<Item = NamespaceDeclaration> + '_ {
        support::children(&self.syntax)
    }

    pub fn classes(&self) -> impl Iterator<Item = ClassDeclaration> + '_ {
        support::children(&self.syntax)
    }
}

impl NamespaceDeclaration {
    pub fn classes(&self) -> impl Iterator<Item = ClassDeclaration> + '_ {
        support::children(&self.syntax)
    }
}

impl ClassDeclaration {
    pub fn modifiers(&self) -> Option<Modifiers> {
        support::child(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|tok| tok.text().to_string())
    }

    pub fn l_brace(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LBrace)
    }

    pub fn r_brace(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RBrace)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldDeclaration> + '_ {
        support::children(&self.syntax)
    }

    pub fn constructors(&self) -> impl Iterator<Item = ConstructorDeclaration> + '_ {
        support::children(&self.syntax)
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDeclaration> + '_ {
        support::children(&self.syntax)
    }

    pub fn properties(&self) -> impl Iterator<Item = PropertyDeclaration> + '_ {
        support::children(&self.syntax)
    }

    pub fn nested_classes(&self) -> impl Iterator<Item = ClassDeclaration> + '_ {
        support::children(&self.syntax)
    }
}

impl Modifiers {
    pub fn keywords(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|tok| !tok.kind().is_trivia())
    }

    pub fn has(&self, kind: SyntaxKind) -> bool {
        self.keywords().any(|tok| tok.kind() == kind)
    }
}

impl Type {
    /// The type as written, without surrounding trivia.
    pub fn text(&self) -> String {
        crate::significant_text(&self.syntax)
    }
}

impl FieldDeclaration {
    pub fn modifiers(&self) -> Option<Modifiers> {
        support::child(&self.syntax)
    }

    pub fn ty(&self) -> Option<Type> {
        support::child(&self.syntax)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> + '_ {
        support::children(&self.syntax)
    }
}

impl VariableDeclarator {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|tok| tok.text().to_string())
    }

    pub fn field(&self) -> Option<FieldDeclaration> {
        self.syntax.ancestors().find_map(FieldDeclaration::cast)
    }
}

impl MethodDeclaration {
    pub fn return_type(&self) -> Option<Type> {
        support::child(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        support::child(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        support::child(&self.syntax)
    }
}

impl PropertyDeclaration {
    pub fn ty(&self) -> Option<Type> {
        support::child(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }
}

impl ConstructorDeclaration {
    pub fn modifiers(&self) -> Option<Modifiers> {
        support::child(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        support::child(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        support::child(&self.syntax)
    }
}

impl ParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        support::children(&self.syntax)
    }

    pub fn l_paren(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LParen)
    }

    pub fn r_paren(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RParen)
    }
}

impl Parameter {
    pub fn ty(&self) -> Option<Type> {
        support::child(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|tok| tok.text().to_string())
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        support::children(&self.syntax)
    }

    pub fn l_brace(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LBrace)
    }

    pub fn r_brace(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RBrace)
    }
}

impl Statement {
    pub fn text(&self) -> String {
        crate::significant_text(&self.syntax)
    }
}
