//! Core shared text types for HotCommands.
//!
//! This crate is intentionally small: byte offsets and ranges (re-exported from
//! `text-size`), a line index, and editor selections.

mod selection;
mod text;

pub use selection::Selection;
pub use text::{LineCol, LineIndex, TextRange, TextSize};
