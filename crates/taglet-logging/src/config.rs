// ABOUTME: Logging settings for taglet hosts: level, extra filter directives and sinks
// ABOUTME: Resolved from the config file, then the environment, then command line flags

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::Level;

/// How records reach stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleFormat {
    Off,
    #[default]
    Compact,
    Pretty,
    /// One JSON object per line
    Json,
}

/// The `[logging]` table of a taglet config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Baseline level for every target
    #[serde(with = "level_name")]
    pub level: Level,

    /// Extra `EnvFilter` directives, e.g. `taglet_core=trace`
    pub directives: Option<String>,

    pub console: ConsoleFormat,

    /// Daily-rolling log file; `None` turns file output off
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            directives: None,
            console: ConsoleFormat::default(),
            file: Some(default_log_file_path()),
        }
    }
}

impl LoggingConfig {
    /// Apply `TAGLET_LOG`, `RUST_LOG`, `TAGLET_LOG_FILE`, `TAGLET_LOG_NO_FILE` and
    /// `TAGLET_LOG_JSON` from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Same as [`apply_env`](Self::apply_env) with an injectable lookup.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(level) = lookup("TAGLET_LOG") {
            self.level = parse_level(&level).context("Invalid TAGLET_LOG level")?;
        }

        // Handed to EnvFilter as-is; a bare level in here still wins over `level`
        if let Some(directives) = lookup("RUST_LOG").filter(|d| !d.trim().is_empty()) {
            self.directives = Some(directives);
        }

        if let Some(path) = lookup("TAGLET_LOG_FILE") {
            self.file = Some(PathBuf::from(path));
        }
        if lookup("TAGLET_LOG_NO_FILE").is_some() {
            self.file = None;
        }

        if lookup("TAGLET_LOG_JSON").is_some() && self.console != ConsoleFormat::Off {
            self.console = ConsoleFormat::Json;
        }

        Ok(())
    }

    /// A full-screen UI owns the terminal, so nothing may be written to stderr.
    pub fn for_terminal_ui(mut self) -> Self {
        self.console = ConsoleFormat::Off;
        self
    }

    /// Command line verbosity beats both the file and the environment.
    pub fn with_verbosity(mut self, level: Option<Level>) -> Self {
        if let Some(level) = level {
            self.level = level;
        }
        self
    }

    /// An explicit `--log-file` re-enables file output even after `TAGLET_LOG_NO_FILE`.
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.file = path;
        }
        self
    }

    /// Neither stderr nor a file would receive anything
    pub fn is_silent(&self) -> bool {
        self.console == ConsoleFormat::Off && self.file.is_none()
    }
}

/// `~/.config/taglet/taglet.log`, or the working directory when there is no config dir
fn default_log_file_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("taglet"))
        .unwrap_or_default()
        .join("taglet.log")
}

pub(crate) fn parse_level(name: &str) -> Result<Level> {
    name.trim().parse::<Level>().map_err(|_| {
        anyhow::anyhow!(
            "unknown log level '{}', expected trace, debug, info, warn or error",
            name.trim()
        )
    })
}

mod level_name {
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::Level;

    pub fn serialize<S: Serializer>(level: &Level, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&level.as_str().to_ascii_lowercase())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
        let name = String::deserialize(deserializer)?;
        super::parse_level(&name).map_err(serde::de::Error::custom)
    }
}
