// ABOUTME: The narrow interface the engine needs from a host rich-text editor
// ABOUTME: All offsets are char offsets into the flattened document text

use taglet_types::{Bounds, InlineNode, Point, Selection, TextRange};

use crate::error::HostError;

/// Host editor primitives consumed by the autocomplete engine.
///
/// The host calls back into the engine after every state-affecting edit and
/// for every key press; this trait is how the engine reads and edits the
/// document in return.
pub trait HostEditor {
    /// Current selection. Empty when only a caret is shown.
    fn selection(&self) -> Selection;

    /// Char offset where the block holding the caret starts.
    ///
    /// Hosts that cannot compute this cheaply may return 0, which makes
    /// matching scan the whole document up to the caret.
    fn block_start(&self) -> usize;

    /// Flattened text from `block_start` up to (not including) the caret.
    fn text_before_caret(&self, block_start: usize) -> String;

    /// Screen position of a document offset, `None` when it is not visible.
    fn caret_to_screen(&self, offset: usize) -> Option<Point>;

    /// Visible area used to keep the overlay on screen.
    fn viewport(&self) -> Option<Bounds> {
        None
    }

    /// Replace `range` with `node` as one indivisible edit.
    ///
    /// Returns the offset immediately after the inserted element. On error
    /// the document must be left untouched.
    fn replace_range(&mut self, range: TextRange, node: InlineNode) -> Result<usize, HostError>;

    fn place_caret(&mut self, offset: usize);
}
