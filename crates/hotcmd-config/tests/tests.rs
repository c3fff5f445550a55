use std::fs;

use hotcmd_config::{
    discover_config_path, json_schema, load_for_workspace, with_config_env_lock, BraceStyle,
    ConfigError, FormattingOptions, HotcmdConfig, NewlineStyle, HOTCMD_CONFIG_ENV_VAR,
};
use pretty_assertions::assert_eq;

#[test]
fn empty_config_uses_defaults() {
    let config = HotcmdConfig::load_from_str("").unwrap();
    assert_eq!(config, HotcmdConfig::default());
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
    assert_eq!(config.formatting.indent, "    ");
    assert_eq!(config.formatting.brace_style, BraceStyle::NextLine);
    assert_eq!(config.formatting.newline, NewlineStyle::Auto);
    assert_eq!(config.refactor.field_prefix, "_");
}

#[test]
fn toml_overrides_defaults() {
    let config = HotcmdConfig::load_from_str(
        r#"
[logging]
level = "debug"
json = true

[formatting]
indent = "\t"
brace_style = "same_line"
newline = "crlf"

[refactor]
field_prefix = "m_"
"#,
    )
    .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert_eq!(
        config.formatting,
        FormattingOptions {
            indent: "\t".to_owned(),
            brace_style: BraceStyle::SameLine,
            newline: NewlineStyle::Crlf,
        }
    );
    assert_eq!(config.refactor.field_prefix, "m_");
}

#[test]
fn unknown_keys_are_rejected() {
    let err = HotcmdConfig::load_from_str("[formatting]\ntabs = true\n").unwrap_err();
    let ConfigError::Toml(message) = err else {
        panic!("expected a toml error, got {err:?}");
    };
    assert!(message.contains("tabs"), "{message}");

    assert!(HotcmdConfig::load_from_str("[unknown]\n").is_err());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = HotcmdConfig::load_from_path(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn discovery_prefers_env_then_visible_then_hidden_file() {
    with_config_env_lock(|| {
        std::env::remove_var(HOTCMD_CONFIG_ENV_VAR);

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        assert_eq!(discover_config_path(root), None);
        let (config, path) = load_for_workspace(root).unwrap();
        assert_eq!(config, HotcmdConfig::default());
        assert_eq!(path, None);

        fs::write(root.join(".hotcmd.toml"), "[refactor]\nfield_prefix = \"m_\"\n").unwrap();
        let hidden = discover_config_path(root).unwrap();
        assert!(hidden.ends_with(".hotcmd.toml"));

        fs::write(root.join("hotcmd.toml"), "[logging]\nlevel = \"warn\"\n").unwrap();
        let visible = discover_config_path(root).unwrap();
        assert!(visible.ends_with("hotcmd.toml"));
        let (config, _) = load_for_workspace(root).unwrap();
        assert_eq!(config.logging.level, "warn");

        fs::write(root.join("custom.toml"), "[formatting]\nindent = \"  \"\n").unwrap();
        std::env::set_var(HOTCMD_CONFIG_ENV_VAR, "custom.toml");
        let from_env = discover_config_path(root).unwrap();
        let (config, _) = load_for_workspace(root).unwrap();
        std::env::remove_var(HOTCMD_CONFIG_ENV_VAR);

        assert!(from_env.ends_with("custom.toml"));
        assert_eq!(config.formatting.indent, "  ");
    });
}

#[test]
fn schema_describes_every_section() {
    let schema = serde_json::to_value(json_schema()).unwrap();
    let properties = schema["properties"].as_object().unwrap();
    for section in ["logging", "formatting", "refactor"] {
        assert!(properties.contains_key(section), "missing {section}");
    }
    let indent = &schema["definitions"]["FormattingOptions"]["properties"]["indent"];
    assert_eq!(indent["minLength"], 1);
}
