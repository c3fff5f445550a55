//! Configuration for HotCommands: TOML loading and discovery, the JSON
//! schema of the file, and `tracing` setup.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use parking_lot::ReentrantMutex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod logging;
mod schema;

pub use logging::{init_tracing, LoggingConfig};
pub use schema::json_schema;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
/// Top-level HotCommands configuration loaded from TOML.
///
/// ```toml
/// [logging]
/// level = "info"
///
/// [formatting]
/// indent = "    "
/// brace_style = "next_line" # "next_line" | "same_line"
/// newline = "auto"          # "auto" | "lf" | "crlf"
///
/// [refactor]
/// field_prefix = "_"
/// ```
pub struct HotcmdConfig {
    /// Global logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Layout of code generated by refactorings.
    #[serde(default)]
    pub formatting: FormattingOptions,

    #[serde(default)]
    pub refactor: RefactorConfig,
}

/// Where the opening brace of a generated body goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BraceStyle {
    /// Opening brace on its own line, aligned with the declaration.
    #[default]
    NextLine,
    /// Opening brace at the end of the declaration line.
    SameLine,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NewlineStyle {
    /// Reuse the first line break found in the document (`\n`, `\r\n` or a
    /// lone `\r`), `\n` if there is none.
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl NewlineStyle {
    /// The line break to emit into a document whose text is `text`.
    pub fn resolve(self, text: &str) -> &'static str {
        match self {
            NewlineStyle::Lf => "\n",
            NewlineStyle::Crlf => "\r\n",
            NewlineStyle::Auto => match text.find(['\n', '\r']) {
                Some(idx) if text[idx..].starts_with("\r\n") => "\r\n",
                Some(idx) if text[idx..].starts_with('\r') => "\r",
                _ => "\n",
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FormattingOptions {
    /// One level of indentation.
    #[serde(default = "FormattingOptions::default_indent")]
    pub indent: String,

    #[serde(default)]
    pub brace_style: BraceStyle,

    #[serde(default)]
    pub newline: NewlineStyle,
}

impl FormattingOptions {
    fn default_indent() -> String {
        "    ".to_owned()
    }
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            indent: Self::default_indent(),
            brace_style: BraceStyle::default(),
            newline: NewlineStyle::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RefactorConfig {
    /// Prefix stripped once from a field name to derive a parameter name.
    #[serde(default = "RefactorConfig::default_field_prefix")]
    pub field_prefix: String,
}

impl RefactorConfig {
    fn default_field_prefix() -> String {
        "_".to_owned()
    }
}

impl Default for RefactorConfig {
    fn default() -> Self {
        Self {
            field_prefix: Self::default_field_prefix(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // `Display` includes a source snippet; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl HotcmdConfig {
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::load_from_str(&text),
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

pub const HOTCMD_CONFIG_ENV_VAR: &str = "HOTCMD_CONFIG_PATH";

/// Config file names looked up in the workspace root, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["hotcmd.toml", ".hotcmd.toml"];

fn env_lock() -> &'static ReentrantMutex<()> {
    static LOCK: OnceLock<ReentrantMutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| ReentrantMutex::new(()))
}

/// Run `f` while holding the lock [`discover_config_path`] reads the
/// environment under.
///
/// Tests that set [`HOTCMD_CONFIG_ENV_VAR`] must wrap both the mutation and
/// the discovery in this helper; the environment is process-global.
pub fn with_config_env_lock<R>(f: impl FnOnce() -> R) -> R {
    let _guard = env_lock().lock();
    f()
}

/// Finds the config file for `workspace_root`.
///
/// An explicit [`HOTCMD_CONFIG_ENV_VAR`] wins even if the file does not exist,
/// so loading reports it. Relative values resolve against `workspace_root`.
/// Otherwise the first existing entry of [`CONFIG_FILE_NAMES`] is used.
pub fn discover_config_path(workspace_root: &Path) -> Option<PathBuf> {
    let explicit = with_config_env_lock(|| std::env::var_os(HOTCMD_CONFIG_ENV_VAR));
    let found = match explicit {
        Some(value) => Some(workspace_root.join(value)),
        None => CONFIG_FILE_NAMES
            .iter()
            .map(|name| workspace_root.join(name))
            .find(|candidate| candidate.is_file()),
    }?;
    Some(std::fs::canonicalize(&found).unwrap_or(found))
}

/// Loads the config for `workspace_root`, with the path it came from.
///
/// Without a config file this is [`HotcmdConfig::default`] and `None`.
pub fn load_for_workspace(
    workspace_root: &Path,
) -> Result<(HotcmdConfig, Option<PathBuf>), ConfigError> {
    match discover_config_path(workspace_root) {
        Some(path) => {
            let config = HotcmdConfig::load_from_path(&path)?;
            tracing::debug!(target: "hotcmd.config", path = %path.display(), "loaded config");
            Ok((config, Some(path)))
        }
        None => Ok((HotcmdConfig::default(), None)),
    }
}
