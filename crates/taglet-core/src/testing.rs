// ABOUTME: In-memory host editor used by unit tests
// ABOUTME: Inline elements occupy a single U+FFFC slot in the flattened text

use taglet_types::{Bounds, InlineNode, Point, Selection, TextRange};

use crate::error::HostError;
use crate::host::HostEditor;

pub(crate) const NODE_CHAR: char = '\u{FFFC}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    Char(char),
    Node(InlineNode),
}

#[derive(Debug, Default)]
pub(crate) struct MemoryHost {
    pub slots: Vec<Slot>,
    pub selection: Selection,
    pub offscreen: bool,
    pub viewport: Option<Bounds>,
    pub reject_edits: bool,
    pub edits: Vec<(TextRange, InlineNode)>,
}

impl MemoryHost {
    /// Document holding `text` with the caret at its end
    pub fn with_text(text: &str) -> Self {
        let mut host = Self::default();
        host.type_str(text);
        host
    }

    pub fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            let caret = self.selection.cursor();
            self.slots.insert(caret, Slot::Char(ch));
            self.selection = Selection::caret(caret + 1);
        }
    }

    pub fn set_caret(&mut self, offset: usize) {
        self.selection = Selection::caret(offset.min(self.slots.len()));
    }

    pub fn select(&mut self, anchor: usize, head: usize) {
        self.selection = Selection::new(anchor, head);
    }

    pub fn text(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Char(ch) => *ch,
                Slot::Node(_) => NODE_CHAR,
            })
            .collect()
    }
}

impl HostEditor for MemoryHost {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn block_start(&self) -> usize {
        let caret = self.selection.cursor();
        self.slots[..caret]
            .iter()
            .rposition(|slot| *slot == Slot::Char('\n'))
            .map_or(0, |newline| newline + 1)
    }

    fn text_before_caret(&self, block_start: usize) -> String {
        let caret = self.selection.cursor();
        self.text().chars().skip(block_start).take(caret - block_start).collect()
    }

    fn caret_to_screen(&self, offset: usize) -> Option<Point> {
        if self.offscreen {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let x = offset as f32 * 8.0;
        Some(Point::new(x, 16.0))
    }

    fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    fn replace_range(&mut self, range: TextRange, node: InlineNode) -> Result<usize, HostError> {
        if range.to > self.slots.len() {
            return Err(HostError::InvalidRange {
                range,
                len: self.slots.len(),
            });
        }
        if self.reject_edits {
            return Err(HostError::Rejected("document is read-only".into()));
        }

        self.edits.push((range, node.clone()));
        self.slots
            .splice(range.from..range.to, std::iter::once(Slot::Node(node)));
        Ok(range.from + 1)
    }

    fn place_caret(&mut self, offset: usize) {
        self.set_caret(offset);
    }
}
