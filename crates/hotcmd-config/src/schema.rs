use schemars::schema::{RootSchema, Schema};
use schemars::schema_for;

use crate::HotcmdConfig;

/// JSON schema for `hotcmd.toml`.
#[must_use]
pub fn json_schema() -> RootSchema {
    let mut schema = schema_for!(HotcmdConfig);
    apply_semantic_constraints(&mut schema);
    schema
}

fn apply_semantic_constraints(schema: &mut RootSchema) {
    // Indentation is inserted verbatim into generated code.
    let Some(Schema::Object(formatting)) = schema.definitions.get_mut("FormattingOptions") else {
        return;
    };
    if let Some(Schema::Object(indent)) = formatting.object().properties.get_mut("indent") {
        let string = indent.string();
        string.min_length = Some(1);
        string.pattern = Some("^[ \\t]+$".to_owned());
    }
}
