// ABOUTME: Configuration file for the terminal demo
// ABOUTME: Wraps the engine config and adds the demo's tag list, workspace root and logging

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taglet_core::AutocompleteConfig;
use taglet_logging::LoggingConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagletConfig {
    pub autocomplete: AutocompleteConfig,
    pub demo: DemoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Suggestions offered after the tag trigger
    pub tags: Vec<String>,

    /// Directory whose files are offered after the mention trigger
    pub root: PathBuf,

    /// Stop walking the workspace after this many files
    pub max_files: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tags: ["bug", "feature", "docs", "backend", "frontend", "perf", "security"]
                .into_iter()
                .map(String::from)
                .collect(),
            root: PathBuf::from("."),
            max_files: 10_000,
        }
    }
}

impl TagletConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("Failed to parse taglet config")?;
        config
            .autocomplete
            .validate()
            .context("Invalid [autocomplete] settings")?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("Invalid config: {}", path.display()))
    }
}
