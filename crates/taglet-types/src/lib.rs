// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer for all other taglet crates

pub mod candidate;
pub mod geometry;
pub mod input;
pub mod text;

// Re-export commonly used types
pub use candidate::{Candidate, InlineNode};
pub use geometry::{Bounds, Point, Size};
pub use input::Key;
pub use text::{MatchResult, Selection, TextRange, TriggerKind};
