//! Constructors for freshly generated syntax.
//!
//! Generated nodes follow the same trivia convention as supplied trees:
//! leading trivia sits in the innermost node starting at the first token.

use hotcmd_config::BraceStyle;
use hotcmd_syntax::green::{self, GreenElement};
use hotcmd_syntax::SyntaxKind;
use rowan::{GreenNode, NodeOrToken};

/// Layout of generated code, resolved against the target document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) newline: &'static str,
    pub(crate) indent_unit: String,
    pub(crate) brace_style: BraceStyle,
}

/// Splits whitespace-only `text` into `Newline` and `Whitespace` tokens.
pub(crate) fn trivia(text: &str) -> Vec<GreenElement> {
    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let (kind, len) = if rest.starts_with("\r\n") {
            (SyntaxKind::Newline, 2)
        } else if rest.starts_with(['\n', '\r']) {
            (SyntaxKind::Newline, 1)
        } else {
            let len = rest.find(['\n', '\r']).unwrap_or(rest.len());
            (SyntaxKind::Whitespace, len)
        };
        out.push(green::token(kind, &rest[..len]));
        rest = &rest[len..];
    }
    out
}

/// Prepends `text` as leading trivia of `node`.
pub(crate) fn with_leading_trivia(node: &GreenNode, text: &str) -> GreenNode {
    if text.is_empty() {
        return node.clone();
    }
    green::with_children(node, |children| {
        let first = match children.first() {
            Some(NodeOrToken::Node(first)) => Some(with_leading_trivia(first, text)),
            _ => None,
        };
        match first {
            Some(first) => children[0] = NodeOrToken::Node(first),
            None => {
                children.splice(0..0, trivia(text));
            }
        }
    })
}

fn name_ref(leading: &str, name: &str) -> GreenNode {
    let mut children = trivia(leading);
    children.push(green::token(SyntaxKind::Identifier, name));
    green::node(SyntaxKind::NameRef, children)
}

/// `this.<field> = <value>;` preceded by `leading`.
pub(crate) fn this_assignment(leading: &str, field: &str, value: &str) -> GreenNode {
    let mut this = trivia(leading);
    this.push(green::token(SyntaxKind::ThisKw, "this"));
    let target = green::node(
        SyntaxKind::MemberAccessExpression,
        [
            NodeOrToken::Node(green::node(SyntaxKind::ThisExpression, this)),
            green::token(SyntaxKind::Dot, "."),
            NodeOrToken::Node(name_ref("", field)),
        ],
    );
    let assignment = green::node(
        SyntaxKind::AssignmentExpression,
        [
            NodeOrToken::Node(target),
            green::token(SyntaxKind::Whitespace, " "),
            green::token(SyntaxKind::Eq, "="),
            NodeOrToken::Node(name_ref(" ", value)),
        ],
    );
    green::node(
        SyntaxKind::Statement,
        [
            NodeOrToken::Node(assignment),
            green::token(SyntaxKind::Semicolon, ";"),
        ],
    )
}

/// `<ty> <name>` preceded by `leading`; `ty` must not carry outer trivia.
pub(crate) fn parameter(leading: &str, ty: &GreenNode, name: &str) -> GreenNode {
    green::node(
        SyntaxKind::Parameter,
        [
            NodeOrToken::Node(with_leading_trivia(ty, leading)),
            green::token(SyntaxKind::Whitespace, " "),
            green::token(SyntaxKind::Identifier, name),
        ],
    )
}

/// `public <class_name>(<parameter>) { <statement> }` laid out with `layout`.
///
/// `leading` goes in front of the declaration; `indent` is the indentation of
/// the declaration's own line.
pub(crate) fn constructor(
    leading: &str,
    indent: &str,
    class_name: &str,
    parameter: GreenNode,
    statement_field: &str,
    statement_value: &str,
    layout: &Layout,
) -> GreenNode {
    let mut modifiers = trivia(leading);
    modifiers.push(green::token(SyntaxKind::PublicKw, "public"));

    let parameter_list = green::node(
        SyntaxKind::ParameterList,
        [
            green::token(SyntaxKind::LParen, "("),
            NodeOrToken::Node(parameter),
            green::token(SyntaxKind::RParen, ")"),
        ],
    );

    let statement_leading = format!("{}{indent}{}", layout.newline, layout.indent_unit);
    let brace_leading = match layout.brace_style {
        BraceStyle::NextLine => format!("{}{indent}", layout.newline),
        BraceStyle::SameLine => " ".to_owned(),
    };
    let mut block = trivia(&brace_leading);
    block.push(green::token(SyntaxKind::LBrace, "{"));
    block.push(NodeOrToken::Node(this_assignment(
        &statement_leading,
        statement_field,
        statement_value,
    )));
    block.extend(trivia(&format!("{}{indent}", layout.newline)));
    block.push(green::token(SyntaxKind::RBrace, "}"));

    green::node(
        SyntaxKind::ConstructorDeclaration,
        [
            NodeOrToken::Node(green::node(SyntaxKind::Modifiers, modifiers)),
            green::token(SyntaxKind::Whitespace, " "),
            green::token(SyntaxKind::Identifier, class_name),
            NodeOrToken::Node(parameter_list),
            NodeOrToken::Node(green::node(SyntaxKind::Block, block)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn string_type() -> GreenNode {
        green::node(
            SyntaxKind::Type,
            [green::token(SyntaxKind::StringKw, "string")],
        )
    }

    #[test]
    fn trivia_splits_line_breaks() {
        let kinds: Vec<_> = trivia("\r\n\n  ")
            .iter()
            .map(|element| match element {
                NodeOrToken::Token(token) => (green::element_kind(element), token.text().to_owned()),
                NodeOrToken::Node(_) => panic!("trivia must be tokens"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                (SyntaxKind::Newline, "\r\n".to_owned()),
                (SyntaxKind::Newline, "\n".to_owned()),
                (SyntaxKind::Whitespace, "  ".to_owned()),
            ]
        );
    }

    #[test]
    fn assignment_text() {
        let statement = this_assignment("\n    ", "_name", "name");
        assert_eq!(statement.to_string(), "\n    this._name = name;");
    }

    #[test]
    fn leading_trivia_goes_to_the_innermost_first_node() {
        let parameter = parameter(" ", &string_type(), "name");
        assert_eq!(parameter.to_string(), " string name");
        let Some(NodeOrToken::Node(ty)) = parameter.children().next() else {
            panic!("parameter must start with its type");
        };
        assert_eq!(ty.to_string(), " string");
    }

    #[test]
    fn constructor_layouts() {
        let next_line = Layout {
            newline: "\n",
            indent_unit: "    ".to_owned(),
            brace_style: BraceStyle::NextLine,
        };
        let ctor = constructor(
            "\n\n    ",
            "    ",
            "C",
            parameter("", &string_type(), "name"),
            "_name",
            "name",
            &next_line,
        );
        assert_eq!(
            ctor.to_string(),
            "\n\n    public C(string name)\n    {\n        this._name = name;\n    }"
        );

        let same_line = Layout {
            newline: "\r\n",
            indent_unit: "\t".to_owned(),
            brace_style: BraceStyle::SameLine,
        };
        let ctor = constructor(
            "\r\n\r\n\t",
            "\t",
            "C",
            parameter("", &string_type(), "name"),
            "_name",
            "name",
            &same_line,
        );
        assert_eq!(
            ctor.to_string(),
            "\r\n\r\n\tpublic C(string name) {\r\n\t\tthis._name = name;\r\n\t}"
        );
    }
}
