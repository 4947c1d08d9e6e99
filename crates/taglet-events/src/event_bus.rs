// ABOUTME: Event bus trait for observing autocomplete transitions
// ABOUTME: Provides a recording bus that hosts can poll for status display

use parking_lot::Mutex;
use std::sync::Arc;

use crate::autocomplete::Event;

/// Receives every event the engine publishes, synchronously and in order
pub trait EventBus {
    fn dispatch(&self, event: &Event);
}

impl<F> EventBus for F
where
    F: Fn(&Event),
{
    fn dispatch(&self, event: &Event) {
        self(event)
    }
}

/// Bus that keeps a shared log of dispatched events
///
/// Clones share the same log, so a host can hand one clone to the engine and
/// keep another to read from.
#[derive(Debug, Clone, Default)]
pub struct RecordingBus {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn last(&self) -> Option<Event> {
        self.events.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventBus for RecordingBus {
    fn dispatch(&self, event: &Event) {
        self.events.lock().push(event.clone());
    }
}
