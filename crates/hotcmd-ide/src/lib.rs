//! Editor-facing features of HotCommands.
//!
//! Everything here is a pure function of the tree, caret or selection, and
//! classification data the host supplies. Results are new trees or decisions;
//! applying them to a live buffer and dispatching host commands is left to the
//! host.

mod assists;
mod classification;
mod commands;

pub use assists::{assists, Assist, AssistId, AssistKind};
pub use classification::{
    is_fully_commented, toggle_comment_action, ClassificationKind, ClassificationSpan,
    Classifier, StaticClassifier, SyntaxClassifier, ToggleCommentAction,
};
pub use commands::{move_member_down, move_member_up, toggle_comment};
