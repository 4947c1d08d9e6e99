// ABOUTME: Inline mention and tag autocomplete engine
// ABOUTME: Host-agnostic: talks to the editor through HostEditor and OverlayRenderer

pub mod autocomplete;
pub mod commit;
pub mod config;
pub mod debouncer;
pub mod error;
pub mod fetcher;
pub mod host;
pub mod keyboard;
pub mod overlay;
pub mod popup;
pub mod sources;
pub mod state;
pub mod trigger;

#[cfg(test)]
mod testing;

pub use autocomplete::MentionAutocomplete;
pub use commit::{Commit, commit_candidate};
pub use config::AutocompleteConfig;
pub use debouncer::{DebounceConfig, Debouncer, ScheduledTask, Scheduler, TokioScheduler};
pub use error::{AutocompleteError, ConfigError, HostError};
pub use fetcher::{
    FetchOutcome, FetchRequest, FetchUpdate, FetcherConfig, SuggestionFetcher, SuggestionSource,
};
pub use host::HostEditor;
pub use keyboard::AutocompleteAction;
pub use overlay::{OverlayMetrics, OverlayRenderer, OverlayRow, OverlaySlot, OverlayStatus, OverlayView};
pub use popup::{PopupConstraints, PopupPlacement, PopupPosition, PopupPositioner};
pub use sources::FuzzySource;
pub use state::{ActiveMatch, AutocompleteState, MatchTransition, Phase};
pub use trigger::TriggerMatcher;

pub use taglet_events as events;
pub use taglet_types as types;
