//! Utilities shared by HotCommands tests.
//!
//! The engine never parses source text; hosts hand it finished trees. Tests
//! still want to write fixtures as source, so this crate carries a small
//! reader for the C# subset the fixtures use (usings, namespaces, classes,
//! fields, properties, methods, constructors, statements) plus caret and
//! range marker helpers.

mod lexer;
mod markers;
mod reader;

pub use lexer::{lex, Token};
pub use markers::{
    extract_caret, extract_range, CARET_MARKER, RANGE_END_MARKER, RANGE_START_MARKER,
};
pub use reader::{fixture_with_caret, fixture_with_range, parse_fixture};
