// ABOUTME: Error types for configuration, host edits and engine construction
// ABOUTME: Fetch failures are not represented here; they never leave the engine

use taglet_types::TextRange;
use thiserror::Error;

/// Invalid autocomplete configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("mention and tag triggers must differ (both are '{0}')")]
    DuplicateTrigger(char),

    #[error("trigger '{0}' cannot be whitespace or alphanumeric")]
    InvalidTrigger(char),

    #[error("debounce interval must be greater than zero")]
    ZeroDebounce,

    #[error("max debounce ({max_ms}ms) is shorter than the debounce interval ({debounce_ms}ms)")]
    MaxDebounceTooShort { debounce_ms: u64, max_ms: u64 },
}

/// The host editor refused an edit. The document is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("range {range} is outside the document (length {len})")]
    InvalidRange { range: TextRange, len: usize },

    #[error("edit rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum AutocompleteError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build trigger pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("no tokio runtime available to schedule suggestion fetches")]
    NoRuntime,
}
