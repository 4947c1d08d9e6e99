// ABOUTME: Cross-crate event definitions for observing the autocomplete engine
// ABOUTME: Events are immutable facts published after each state transition

pub mod autocomplete;
pub mod event_bus;

pub use autocomplete::{DeactivationReason, Event, FetchRequestId};
pub use event_bus::{EventBus, RecordingBus};
