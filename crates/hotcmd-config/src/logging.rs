use std::sync::Once;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

const DEFAULT_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A level name (`trace` through `error`, `warning` allowed) or any
    /// `EnvFilter` directive string such as `hotcmd_refactor=trace`.
    #[serde(default = "default_level")]
    pub level: String,

    /// JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    DEFAULT_LEVEL.to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Directives configured by `level`, with level names normalized.
    pub fn directives(&self) -> String {
        let level = self.level.trim();
        if level.is_empty() {
            return default_level();
        }
        if level.eq_ignore_ascii_case("warning") {
            return LevelFilter::WARN.to_string().to_lowercase();
        }
        match level.parse::<LevelFilter>() {
            Ok(filter) => filter.to_string().to_lowercase(),
            Err(_) => level.to_owned(),
        }
    }

    /// Filter for the subscriber. Directives from `RUST_LOG` are appended to
    /// the configured ones, so they win where both name the same target.
    pub fn env_filter(&self) -> EnvFilter {
        let configured = self.directives();
        let from_env = std::env::var("RUST_LOG").unwrap_or_default();
        let from_env = from_env.trim();

        let mut candidates = Vec::with_capacity(3);
        if !from_env.is_empty() {
            candidates.push(format!("{configured},{from_env}"));
            candidates.push(from_env.to_owned());
        }
        candidates.push(configured);

        candidates
            .into_iter()
            .find_map(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global `tracing` subscriber, writing to stderr.
///
/// Only the first call in a process does anything. A subscriber installed by
/// the host beforehand is left in place.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let fmt = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false);
        let fmt: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            fmt.json().boxed()
        } else {
            fmt.boxed()
        };

        let installed = tracing_subscriber::registry()
            .with(config.env_filter())
            .with(fmt)
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!(target: "hotcmd.config", directives = %config.directives(), "tracing initialized");
        }
    });
}
