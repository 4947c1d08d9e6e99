// ABOUTME: Document positions, selections and trigger match results
// ABOUTME: All offsets are char offsets into the host document's flattened text

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of inline reference is being typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// A reference to an entity (file, user, symbol), default trigger `@`
    Mention,
    /// A free-form label, default trigger `#`
    Tag,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Mention => "mention",
            TriggerKind::Tag => "tag",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open char range `[from, to)` in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub from: usize,
    pub to: usize,
}

impl TextRange {
    /// Create a range, swapping the ends if they arrive reversed
    pub fn new(from: usize, to: usize) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.from <= offset && offset < self.to
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

/// Host selection expressed as anchor/head offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    /// A collapsed selection (plain caret) at `offset`
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// True when the selection is a single caret rather than a range
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// The caret position; for ranges this is the moving end
    pub fn cursor(&self) -> usize {
        self.head
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.anchor, self.head)
    }
}

/// Outcome of a successful trigger match at the caret
///
/// Produced fresh on every document change and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    /// Trigger character plus query, in document coordinates
    pub range: TextRange,
    /// Text typed after the trigger character, without the trigger itself
    pub query: String,
    pub kind: TriggerKind,
}

impl MatchResult {
    pub fn new(kind: TriggerKind, range: TextRange, query: impl Into<String>) -> Self {
        Self {
            range,
            query: query.into(),
            kind,
        }
    }
}
