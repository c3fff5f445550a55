use hotcmd_config::HotcmdConfig;
use hotcmd_core::TextRange;
use hotcmd_refactor::{tree_edit, InitializeFieldFromConstructor, InitializeFieldOptions, TextEdit};
use hotcmd_syntax::{AstNode, SyntaxTree};
use serde::{Deserialize, Serialize};

/// Stable identifier of an assist, suitable for host command routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AssistId(pub &'static str);

impl AssistId {
    pub const INITIALIZE_FIELD_FROM_CONSTRUCTOR: AssistId =
        AssistId("initialize_field_from_constructor");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistKind {
    RefactorRewrite,
}

/// A refactoring offered at a selection, already computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assist {
    pub id: AssistId,
    pub title: &'static str,
    pub kind: AssistKind,
    /// Range of the name the assist was offered for.
    pub target: TextRange,
    /// The tree after applying the assist.
    pub tree: SyntaxTree,
    /// Minimal text replacement turning the input text into `tree`'s text.
    pub edit: Option<TextEdit>,
}

/// Assists applicable at `range`.
///
/// Refactorings that are recognized at the selection but fail to apply are
/// left out.
pub fn assists(tree: &SyntaxTree, range: TextRange, config: &HotcmdConfig) -> Vec<Assist> {
    let mut acc = Vec::new();

    if let Some(refactoring) = InitializeFieldFromConstructor::at(tree, range) {
        let options = InitializeFieldOptions::from(config);
        match refactoring.apply(tree, &options) {
            Ok(edited) => acc.push(Assist {
                id: AssistId::INITIALIZE_FIELD_FROM_CONSTRUCTOR,
                title: refactoring.title(),
                kind: AssistKind::RefactorRewrite,
                target: target_range(&refactoring),
                edit: tree_edit(tree, &edited),
                tree: edited,
            }),
            Err(err) => {
                tracing::debug!(%err, "initialize field from constructor not applicable");
            }
        }
    }

    acc
}

fn target_range(refactoring: &InitializeFieldFromConstructor) -> TextRange {
    let variable = refactoring.variable();
    variable
        .name_token()
        .map(|token| token.text_range())
        .unwrap_or_else(|| variable.syntax().text_range())
}
