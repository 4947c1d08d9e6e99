// ABOUTME: Replaces the matched trigger text with an inline element
// ABOUTME: The host performs the replace as one atomic edit

use taglet_types::{Candidate, InlineNode, TextRange, TriggerKind};

use crate::error::HostError;
use crate::host::HostEditor;

/// A successful commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub node: InlineNode,
    pub range: TextRange,
    /// Offset right after the inserted element, where the caret now sits
    pub caret: usize,
}

/// Replace `range` with the inline element for `candidate` and move the caret after it.
///
/// The document is untouched when the host rejects the edit.
pub fn commit_candidate(
    host: &mut dyn HostEditor,
    kind: TriggerKind,
    range: TextRange,
    candidate: &Candidate,
) -> Result<Commit, HostError> {
    let node = InlineNode::from_candidate(kind, candidate);
    let caret = host.replace_range(range, node.clone())?;
    host.place_caret(caret);

    Ok(Commit { node, range, caret })
}
