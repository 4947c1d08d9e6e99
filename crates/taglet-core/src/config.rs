// ABOUTME: Autocomplete configuration loaded from TOML with per-field defaults
// ABOUTME: Covers trigger characters, debounce timing and result limits

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Engine configuration. Every field has a default, so an empty TOML table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    pub mention_trigger: char,

    pub tag_trigger: char,

    /// Allow a single internal space inside a mention query ("@jane do")
    pub allow_spaces_in_mentions: bool,

    /// Quiet period before a fetch fires
    pub debounce_ms: u64,

    /// Force a fetch after this long even if typing never pauses
    pub max_debounce_ms: Option<u64>,

    /// Fetched lists are truncated to this many entries
    pub max_candidates: usize,

    /// Fetches slower than this log a warning
    pub slow_fetch_warn_ms: u64,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            mention_trigger: '@',
            tag_trigger: '#',
            allow_spaces_in_mentions: false,
            debounce_ms: 500,
            max_debounce_ms: None,
            max_candidates: 50,
            slow_fetch_warn_ms: 1000,
        }
    }
}

impl AutocompleteConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("Failed to parse autocomplete config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for trigger in [self.mention_trigger, self.tag_trigger] {
            if trigger.is_whitespace() || trigger.is_alphanumeric() || trigger == '_' {
                return Err(ConfigError::InvalidTrigger(trigger));
            }
        }

        if self.mention_trigger == self.tag_trigger {
            return Err(ConfigError::DuplicateTrigger(self.mention_trigger));
        }

        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }

        if let Some(max_ms) = self.max_debounce_ms
            && max_ms < self.debounce_ms
        {
            return Err(ConfigError::MaxDebounceTooShort {
                debounce_ms: self.debounce_ms,
                max_ms,
            });
        }

        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn max_debounce(&self) -> Option<Duration> {
        self.max_debounce_ms.map(Duration::from_millis)
    }

    pub fn slow_fetch_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_fetch_warn_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AutocompleteConfig::default();
        assert_eq!(config.mention_trigger, '@');
        assert_eq!(config.tag_trigger, '#');
        assert!(!config.allow_spaces_in_mentions);
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.max_debounce(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AutocompleteConfig::from_toml_str(
            r#"
            tag_trigger = "+"
            allow_spaces_in_mentions = true
            "#,
        )
        .unwrap();

        assert_eq!(config.mention_trigger, '@');
        assert_eq!(config.tag_trigger, '+');
        assert!(config.allow_spaces_in_mentions);
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn test_validation_errors() {
        let config = AutocompleteConfig {
            tag_trigger: '@',
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DuplicateTrigger('@')));

        let config = AutocompleteConfig {
            mention_trigger: 'a',
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTrigger('a')));

        let config = AutocompleteConfig {
            debounce_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounce));

        let config = AutocompleteConfig {
            max_debounce_ms: Some(100),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MaxDebounceTooShort { .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_toml() {
        assert!(AutocompleteConfig::from_toml_str("debounce_ms = \"soon\"").is_err());
        assert!(AutocompleteConfig::from_toml_str("debounce_ms = 0").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = 250\nmax_candidates = 5").unwrap();

        let config = AutocompleteConfig::load(file.path()).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.max_candidates, 5);

        assert!(AutocompleteConfig::load(Path::new("/nonexistent/taglet.toml")).is_err());
    }
}
