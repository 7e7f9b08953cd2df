//! Centralized planner configuration.
//!
//! Loaded via the `config` crate from an optional TOML file, overridden by
//! environment variables prefixed with `TASKFLOW` (nested keys separated by
//! `__`, e.g. `TASKFLOW__OUTPUT__PRETTY=false`).

use serde::Deserialize;
use std::path::Path;

/// Planner configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    /// Default tracing filter, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Output formatting.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON written to stdout.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            output: OutputConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Loads configuration from `file` (when given) and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or a value has
    /// the wrong type.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix("TASKFLOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
