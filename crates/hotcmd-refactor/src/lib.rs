//! Structural refactorings for HotCommands.
//!
//! Today this crate exposes:
//! - Member reordering for sibling declarations (`swap_members`)
//! - Initialize Field From Constructor (`initialize_field`)
//! - Helpers that turn a before/after tree pair into text edits and previews (`edit`)

mod edit;
mod initialize_field;
mod make;
mod reorder;

pub use edit::{apply_text_edits, tree_edit, unified_diff, EditError, TextEdit};
pub use initialize_field::{
    derive_parameter_name, initialize_field_at, initialize_field_from_constructor,
    InitializeFieldError, InitializeFieldFromConstructor, InitializeFieldOptions, ParameterSpec,
};
pub use reorder::{swap_members, ReorderError};
