// ABOUTME: Autocomplete domain events covering activation, fetching, selection and commit
// ABOUTME: Follows event sourcing principles: every variant describes something that happened

use serde::{Deserialize, Serialize};
use std::fmt;
use taglet_types::{TextRange, TriggerKind};

/// Unique, monotonically increasing identifier for a fired suggestion fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FetchRequestId(pub u64);

impl FetchRequestId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FetchRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why the engine went back to the inactive state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeactivationReason {
    /// The trigger matcher found nothing at the new caret position
    NoMatch,
    /// The host reported a non-empty selection
    Selection,
    /// The user pressed Escape
    Escape,
    /// A candidate was committed (or the commit was rejected by the host)
    Committed,
    /// The owning editor is being torn down
    Teardown,
}

/// Autocomplete lifecycle events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Transitioned from inactive to active
    Activated {
        kind: TriggerKind,
        range: TextRange,
        query: String,
    },

    /// Still active, match replaced by a fresh one
    QueryChanged {
        kind: TriggerKind,
        range: TextRange,
        query: String,
        kind_changed: bool,
    },

    /// A debounced fetch was (re)scheduled; any earlier unfired one was cancelled
    FetchScheduled { kind: TriggerKind, query: String },

    /// The debounce window elapsed and the fetch went out
    FetchStarted {
        request_id: FetchRequestId,
        kind: TriggerKind,
        query: String,
    },

    /// Results matched the live query and replaced the candidate list
    ResultsApplied {
        request_id: FetchRequestId,
        count: usize,
    },

    /// Results arrived for a query the user has already moved past
    StaleResultsDropped {
        request_id: FetchRequestId,
        query: String,
    },

    /// The source failed; the panel shows "no results"
    FetchFailed {
        request_id: FetchRequestId,
        message: String,
    },

    HighlightMoved { from: usize, to: usize },

    /// The highlighted candidate replaced the typed trigger text
    Committed {
        kind: TriggerKind,
        range: TextRange,
        candidate_id: String,
    },

    /// The host rejected the replace edit
    CommitFailed { range: TextRange, message: String },

    Deactivated { reason: DeactivationReason },
}

impl Event {
    /// Short, stable name for logging and status lines
    pub fn name(&self) -> &'static str {
        match self {
            Event::Activated { .. } => "activated",
            Event::QueryChanged { .. } => "query_changed",
            Event::FetchScheduled { .. } => "fetch_scheduled",
            Event::FetchStarted { .. } => "fetch_started",
            Event::ResultsApplied { .. } => "results_applied",
            Event::StaleResultsDropped { .. } => "stale_results_dropped",
            Event::FetchFailed { .. } => "fetch_failed",
            Event::HighlightMoved { .. } => "highlight_moved",
            Event::Committed { .. } => "committed",
            Event::CommitFailed { .. } => "commit_failed",
            Event::Deactivated { .. } => "deactivated",
        }
    }
}
