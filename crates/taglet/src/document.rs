// ABOUTME: Single-line document with atomic inline elements, hosting the engine
// ABOUTME: Implements HostEditor over char slots and the last drawn screen layout

use taglet_core::{AutocompleteConfig, HostEditor, HostError};
use taglet_types::{Bounds, InlineNode, Point, Selection, Size, TextRange};
use unicode_width::UnicodeWidthChar;

/// Placeholder an inline element occupies in the flattened text
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Char(char),
    Node(InlineNode),
}

/// How inline elements are drawn: the trigger that created them, then the label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipStyle {
    pub mention: char,
    pub tag: char,
}

impl Default for ChipStyle {
    fn default() -> Self {
        Self::from_config(&AutocompleteConfig::default())
    }
}

impl ChipStyle {
    pub fn from_config(config: &AutocompleteConfig) -> Self {
        Self {
            mention: config.mention_trigger,
            tag: config.tag_trigger,
        }
    }

    pub fn render(&self, node: &InlineNode) -> String {
        match node {
            InlineNode::Mention { label, .. } => format!("{}{label}", self.mention),
            InlineNode::Tag { label } => format!("{}{label}", self.tag),
        }
    }

    /// Terminal cells a slot takes when drawn
    pub fn width(&self, slot: &Slot) -> usize {
        match slot {
            Slot::Char(ch) => ch.width().unwrap_or(0),
            Slot::Node(node) => self.render(node).chars().filter_map(|c| c.width()).sum(),
        }
    }
}

/// Where the input line was last drawn, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenLayout {
    pub origin_x: u16,
    pub origin_y: u16,
    pub screen: Size,
}

#[derive(Debug, Default)]
pub struct LineDocument {
    slots: Vec<Slot>,
    anchor: usize,
    head: usize,
    layout: Option<ScreenLayout>,
    chips: ChipStyle,
}

impl LineDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chips(chips: ChipStyle) -> Self {
        Self {
            chips,
            ..Self::default()
        }
    }

    pub fn chips(&self) -> ChipStyle {
        self.chips
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn caret(&self) -> usize {
        self.head
    }

    pub fn set_layout(&mut self, layout: ScreenLayout) {
        self.layout = Some(layout);
    }

    /// Flattened text; inline elements read as U+FFFC
    pub fn text(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Char(ch) => *ch,
                Slot::Node(_) => OBJECT_REPLACEMENT,
            })
            .collect()
    }

    /// Text as the user sees it, with elements drawn as chips
    pub fn display_text(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Char(ch) => ch.to_string(),
                Slot::Node(node) => self.chips.render(node),
            })
            .collect()
    }

    pub fn insert_char(&mut self, ch: char) {
        self.delete_selection();
        self.slots.insert(self.head, Slot::Char(ch));
        self.collapse_to(self.head + 1);
    }

    /// Delete the selection, or the slot before the caret
    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.head > 0 {
            self.slots.remove(self.head - 1);
            self.collapse_to(self.head - 1);
        }
    }

    /// Delete the selection, or the slot after the caret
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.head < self.slots.len() {
            self.slots.remove(self.head);
        }
    }

    pub fn move_left(&mut self, extend: bool) {
        self.move_to(self.head.saturating_sub(1), extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        self.move_to((self.head + 1).min(self.slots.len()), extend);
    }

    pub fn move_home(&mut self, extend: bool) {
        self.move_to(0, extend);
    }

    pub fn move_end(&mut self, extend: bool) {
        self.move_to(self.slots.len(), extend);
    }

    /// Clear the line and return what it displayed
    pub fn take_line(&mut self) -> String {
        let line = self.display_text();
        self.slots.clear();
        self.collapse_to(0);
        line
    }

    /// Terminal column of a char offset, relative to the line start
    pub fn column_of(&self, offset: usize) -> usize {
        self.slots
            .iter()
            .take(offset)
            .map(|slot| self.chips.width(slot))
            .sum()
    }

    fn move_to(&mut self, offset: usize, extend: bool) {
        self.head = offset;
        if !extend {
            self.anchor = offset;
        }
    }

    fn collapse_to(&mut self, offset: usize) {
        self.anchor = offset;
        self.head = offset;
    }

    fn delete_selection(&mut self) -> bool {
        if self.anchor == self.head {
            return false;
        }
        let range = TextRange::new(self.anchor, self.head);
        self.slots.drain(range.from..range.to);
        self.collapse_to(range.from);
        true
    }
}

impl HostEditor for LineDocument {
    fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.head)
    }

    fn block_start(&self) -> usize {
        0
    }

    fn text_before_caret(&self, block_start: usize) -> String {
        self.slots
            .iter()
            .take(self.head)
            .skip(block_start)
            .map(|slot| match slot {
                Slot::Char(ch) => *ch,
                Slot::Node(_) => OBJECT_REPLACEMENT,
            })
            .collect()
    }

    fn caret_to_screen(&self, offset: usize) -> Option<Point> {
        let layout = self.layout?;
        let column = usize::from(layout.origin_x) + self.column_of(offset);
        let x = u16::try_from(column).ok()?;
        if f32::from(x) >= layout.screen.width {
            return None;
        }
        Some(Point::new(f32::from(x), f32::from(layout.origin_y)))
    }

    fn viewport(&self) -> Option<Bounds> {
        self.layout
            .map(|layout| Bounds::new(Point::new(0.0, 0.0), layout.screen))
    }

    fn replace_range(&mut self, range: TextRange, node: InlineNode) -> Result<usize, HostError> {
        if range.to > self.slots.len() {
            return Err(HostError::InvalidRange {
                range,
                len: self.slots.len(),
            });
        }

        self.slots
            .splice(range.from..range.to, std::iter::once(Slot::Node(node)));
        Ok(range.from + 1)
    }

    fn place_caret(&mut self, offset: usize) {
        self.collapse_to(offset.min(self.slots.len()));
    }
}
