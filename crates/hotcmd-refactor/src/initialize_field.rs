use hotcmd_config::{FormattingOptions, HotcmdConfig, RefactorConfig};
use hotcmd_syntax::ast::{
    Block, ClassDeclaration, ConstructorDeclaration, FieldDeclaration, ParameterList,
    VariableDeclarator,
};
use hotcmd_syntax::{
    green, line_trivia, strip_trivia, AstNode, SyntaxKind, SyntaxNode, SyntaxTree, TextRange,
};
use rowan::{GreenNode, NodeOrToken};
use thiserror::Error;

use crate::make::{self, Layout};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InitializeFieldError {
    #[error("selection is not a field variable")]
    NotAFieldVariable,
    #[error("field is not declared directly in a class")]
    NotInClass,
    #[error("class has no name")]
    UnnamedClass,
    #[error("field has no declared type")]
    MissingType,
    #[error("`{0}` cannot be used as a parameter name")]
    InvalidParameterName(String),
    #[error("constructor already declares a parameter named `{0}`")]
    DuplicateParameter(String),
    #[error("constructor has no parameter list or body")]
    MalformedConstructor,
    #[error("node does not belong to the tree")]
    ForeignNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeFieldOptions {
    /// Stripped once from the field name to get the parameter name.
    pub field_prefix: String,
    pub formatting: FormattingOptions,
}

impl Default for InitializeFieldOptions {
    fn default() -> Self {
        Self {
            field_prefix: RefactorConfig::default().field_prefix,
            formatting: FormattingOptions::default(),
        }
    }
}

impl From<&HotcmdConfig> for InitializeFieldOptions {
    fn from(config: &HotcmdConfig) -> Self {
        Self {
            field_prefix: config.refactor.field_prefix.clone(),
            formatting: config.formatting.clone(),
        }
    }
}

/// The constructor parameter generated for a field variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// The field's declared type as written.
    pub type_name: String,
    pub name: String,
}

impl ParameterSpec {
    pub fn from_field(
        field: &FieldDeclaration,
        variable: &VariableDeclarator,
        prefix: &str,
    ) -> Result<Self, InitializeFieldError> {
        let ty = field.ty().ok_or(InitializeFieldError::MissingType)?;
        let field_name = variable
            .name()
            .ok_or(InitializeFieldError::NotAFieldVariable)?;
        let name = derive_parameter_name(&field_name, prefix)
            .ok_or(InitializeFieldError::InvalidParameterName(field_name))?;
        Ok(Self {
            type_name: ty.text(),
            name,
        })
    }
}

/// Strips `prefix` once from `field_name`.
///
/// Returns `None` when what is left is not a usable identifier, e.g. for a
/// field named `_` or `_class`.
pub fn derive_parameter_name(field_name: &str, prefix: &str) -> Option<String> {
    let name = if prefix.is_empty() {
        field_name
    } else {
        field_name.strip_prefix(prefix).unwrap_or(field_name)
    };
    is_identifier(name).then(|| name.to_owned())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && SyntaxKind::from_keyword(name).is_none()
}

/// Initialize Field From Constructor, resolved at a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeFieldFromConstructor {
    class: ClassDeclaration,
    field: FieldDeclaration,
    variable: VariableDeclarator,
}

impl InitializeFieldFromConstructor {
    pub const TITLE: &'static str = "Initialize field from constructor";

    /// Returns the refactoring if the node covering `range` is a field
    /// variable declared in a class.
    pub fn at(tree: &SyntaxTree, range: TextRange) -> Option<Self> {
        let node = tree.find_covering_node(range)?;
        let variable = VariableDeclarator::cast(node)?;
        let field = variable.field()?;
        let class = field
            .syntax()
            .ancestors()
            .find_map(ClassDeclaration::cast)?;
        Some(Self {
            class,
            field,
            variable,
        })
    }

    pub fn title(&self) -> &'static str {
        Self::TITLE
    }

    pub fn class(&self) -> &ClassDeclaration {
        &self.class
    }

    pub fn field(&self) -> &FieldDeclaration {
        &self.field
    }

    pub fn variable(&self) -> &VariableDeclarator {
        &self.variable
    }

    pub fn apply(
        &self,
        tree: &SyntaxTree,
        options: &InitializeFieldOptions,
    ) -> Result<SyntaxTree, InitializeFieldError> {
        let class =
            initialize_field_from_constructor(&self.class, &self.field, &self.variable, options)?;
        tree.replace_node(self.class.syntax(), class)
            .ok_or(InitializeFieldError::ForeignNode)
    }
}

/// Runs Initialize Field From Constructor for the field variable at `range`.
pub fn initialize_field_at(
    tree: &SyntaxTree,
    range: TextRange,
    options: &InitializeFieldOptions,
) -> Result<SyntaxTree, InitializeFieldError> {
    let refactoring = InitializeFieldFromConstructor::at(tree, range)
        .ok_or(InitializeFieldError::NotAFieldVariable)?;
    refactoring.apply(tree, options)
}

/// Returns `class` rewritten so its constructor takes and assigns `variable`.
///
/// The first constructor declared directly in the class gets the parameter
/// appended to its parameter list and `this.<field> = <parameter>;` appended
/// to its body. Without a constructor, a public one holding just that
/// assignment is inserted right after `field`.
pub fn initialize_field_from_constructor(
    class: &ClassDeclaration,
    field: &FieldDeclaration,
    variable: &VariableDeclarator,
    options: &InitializeFieldOptions,
) -> Result<GreenNode, InitializeFieldError> {
    if field.syntax().parent().as_ref() != Some(class.syntax()) {
        return Err(InitializeFieldError::NotInClass);
    }
    let spec = ParameterSpec::from_field(field, variable, &options.field_prefix)?;
    let field_name = variable
        .name()
        .ok_or(InitializeFieldError::NotAFieldVariable)?;
    let ty = field.ty().ok_or(InitializeFieldError::MissingType)?;
    let ty = strip_trivia(&ty.syntax().green());
    let layout = layout_for(class.syntax(), &options.formatting);

    let class_green = class.syntax().green();
    match class.constructors().next() {
        Some(existing) => {
            let merged = merge_into_constructor(&existing, &ty, &spec, &field_name, &layout)?;
            let idx = existing.syntax().index();
            tracing::debug!(parameter = %spec.name, "merging into existing constructor");
            Ok(green::with_children(&class_green, |children| {
                children[idx] = NodeOrToken::Node(merged);
            }))
        }
        None => {
            let class_name = class.name().ok_or(InitializeFieldError::UnnamedClass)?;
            let leading = format!("{}{}", layout.newline, field_line_context(field, variable));
            let indent = indentation(&leading);
            let constructor = make::constructor(
                &leading,
                indent,
                &class_name,
                make::parameter("", &ty, &spec.name),
                &field_name,
                &spec.name,
                &layout,
            );
            let idx = field.syntax().index() + 1;
            tracing::debug!(parameter = %spec.name, "creating constructor");
            Ok(green::with_children(&class_green, |children| {
                children.insert(idx, NodeOrToken::Node(constructor));
            }))
        }
    }
}

fn layout_for(node: &SyntaxNode, formatting: &FormattingOptions) -> Layout {
    let first_line_break = node
        .ancestors()
        .last()
        .and_then(|root| {
            root.descendants_with_tokens()
                .filter_map(|element| element.into_token())
                .find(|token| token.kind() == SyntaxKind::Newline)
        })
        .map(|token| token.text().to_owned())
        .unwrap_or_default();
    Layout {
        newline: formatting.newline.resolve(&first_line_break),
        indent_unit: formatting.indent.clone(),
        brace_style: formatting.brace_style,
    }
}

/// The line break and indentation the field variable sits behind: its own
/// leading trivia when it starts a line, otherwise the field's.
fn field_line_context(field: &FieldDeclaration, variable: &VariableDeclarator) -> String {
    let own = line_trivia(variable.syntax());
    if own.contains(['\n', '\r']) {
        own
    } else {
        line_trivia(field.syntax())
    }
}

/// Whitespace after the last line break of `trivia`, empty if it has none.
fn indentation(trivia: &str) -> &str {
    match trivia.rfind(['\n', '\r']) {
        Some(idx) => &trivia[idx + 1..],
        None => "",
    }
}

fn merge_into_constructor(
    constructor: &ConstructorDeclaration,
    ty: &GreenNode,
    spec: &ParameterSpec,
    field_name: &str,
    layout: &Layout,
) -> Result<GreenNode, InitializeFieldError> {
    let parameters = constructor
        .parameter_list()
        .ok_or(InitializeFieldError::MalformedConstructor)?;
    let body = constructor
        .body()
        .ok_or(InitializeFieldError::MalformedConstructor)?;
    if parameters
        .parameters()
        .any(|parameter| parameter.name().as_deref() == Some(spec.name.as_str()))
    {
        return Err(InitializeFieldError::DuplicateParameter(spec.name.clone()));
    }

    let new_parameters = append_parameter(&parameters, ty, &spec.name)?;
    let indent = indentation(&line_trivia(constructor.syntax())).to_owned();
    let new_body = append_statement(&body, &indent, field_name, &spec.name, layout)?;

    let (parameters_idx, body_idx) = (parameters.syntax().index(), body.syntax().index());
    Ok(green::with_children(
        &constructor.syntax().green(),
        |children| {
            children[parameters_idx] = NodeOrToken::Node(new_parameters);
            children[body_idx] = NodeOrToken::Node(new_body);
        },
    ))
}

fn append_parameter(
    list: &ParameterList,
    ty: &GreenNode,
    name: &str,
) -> Result<GreenNode, InitializeFieldError> {
    let (idx, new) = match list.parameters().last() {
        Some(last) => (
            after_parameter_trivia(list.syntax(), last.syntax().index() + 1),
            vec![
                green::token(SyntaxKind::Comma, ","),
                NodeOrToken::Node(make::parameter(" ", ty, name)),
            ],
        ),
        None => {
            let l_paren = list
                .l_paren()
                .ok_or(InitializeFieldError::MalformedConstructor)?;
            (
                l_paren.index() + 1,
                vec![NodeOrToken::Node(make::parameter("", ty, name))],
            )
        }
    };
    Ok(green::with_children(&list.syntax().green(), |children| {
        children.splice(idx..idx, new);
    }))
}

fn append_statement(
    body: &Block,
    indent: &str,
    field_name: &str,
    parameter_name: &str,
    layout: &Layout,
) -> Result<GreenNode, InitializeFieldError> {
    let fresh_line = || format!("{}{indent}{}", layout.newline, layout.indent_unit);
    let (idx, leading) = match body.statements().last() {
        Some(last) => {
            let context = line_trivia(last.syntax());
            let leading = if context.contains(['\n', '\r']) {
                context
            } else {
                fresh_line()
            };
            let idx = last.syntax().index() + 1;
            (after_same_line_comments(body.syntax(), idx).unwrap_or(idx), leading)
        }
        None => {
            let l_brace = body
                .l_brace()
                .ok_or(InitializeFieldError::MalformedConstructor)?;
            (l_brace.index() + 1, fresh_line())
        }
    };
    let statement = make::this_assignment(&leading, field_name, parameter_name);
    Ok(green::with_children(&body.syntax().green(), |children| {
        children.insert(idx, NodeOrToken::Node(statement));
    }))
}

/// Scans the trivia tokens of `parent` from child `idx` up to the next line
/// break. Returns the index just past the last comment in that run, and
/// whether that comment runs to the end of the line.
fn same_line_comments(parent: &SyntaxNode, idx: usize) -> Option<(usize, bool)> {
    let mut found = None;
    for (offset, element) in parent.children_with_tokens().skip(idx).enumerate() {
        let kind = element.kind();
        if !kind.is_trivia() || kind == SyntaxKind::Newline {
            break;
        }
        if kind.is_comment() {
            found = Some((idx + offset + 1, kind != SyntaxKind::BlockComment));
        }
    }
    found
}

/// Index past the comments sharing a line with the child before `idx`.
fn after_same_line_comments(parent: &SyntaxNode, idx: usize) -> Option<usize> {
    same_line_comments(parent, idx).map(|(end, _)| end)
}

/// Where a new parameter goes after the one ending at `idx`. Same-line
/// comments stay with the existing parameter. A line comment also takes the
/// line break and indentation after it, so the new parameter starts on the
/// next line instead of inside the comment.
fn after_parameter_trivia(list: &SyntaxNode, idx: usize) -> usize {
    let Some((end, to_line_end)) = same_line_comments(list, idx) else {
        return idx;
    };
    if !to_line_end {
        return end;
    }
    let line_break = list
        .children_with_tokens()
        .skip(end)
        .take_while(|element| element.kind().is_trivia() && !element.kind().is_comment())
        .count();
    end + line_break
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_names_drop_one_prefix() {
        assert_eq!(derive_parameter_name("_name", "_").as_deref(), Some("name"));
        assert_eq!(derive_parameter_name("__name", "_").as_deref(), Some("_name"));
        assert_eq!(derive_parameter_name("name", "_").as_deref(), Some("name"));
        assert_eq!(derive_parameter_name("m_count", "m_").as_deref(), Some("count"));
        assert_eq!(derive_parameter_name("_name", "").as_deref(), Some("_name"));
    }

    #[test]
    fn unusable_parameter_names_are_rejected() {
        assert_eq!(derive_parameter_name("_", "_"), None);
        assert_eq!(derive_parameter_name("_class", "_"), None);
        assert_eq!(derive_parameter_name("_1st", "_"), None);
    }

    #[test]
    fn indentation_is_whatever_follows_the_last_line_break() {
        assert_eq!(indentation("\n\n    "), "    ");
        assert_eq!(indentation("\r\n\t"), "\t");
        assert_eq!(indentation(" "), "");
    }
}
