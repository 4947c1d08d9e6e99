// ABOUTME: Pure view model for the suggestion panel and the renderer seam
// ABOUTME: The engine rebuilds the view after every transition and hides it synchronously

use parking_lot::Mutex;
use std::sync::Arc;
use taglet_types::{Point, Size, TextRange, TriggerKind};

use crate::host::HostEditor;
use crate::popup::{PopupPosition, PopupPositioner};
use crate::state::{ActiveMatch, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStatus {
    /// No results have arrived for this match yet
    Loading,
    NoResults,
    Items,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRow {
    /// Empty when the candidate has no label
    pub label: String,
    pub detail: Option<String>,
    pub highlighted: bool,
}

/// Everything a renderer needs to paint one frame of the panel
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub kind: TriggerKind,
    pub query: String,
    /// Screen position of the start of the matched text
    pub anchor: Point,
    /// Set when the host reports a viewport
    pub position: Option<PopupPosition>,
    /// Document span to decorate as "will be replaced"
    pub decoration: TextRange,
    pub rows: Vec<OverlayRow>,
    pub status: OverlayStatus,
}

/// Units used to estimate the panel's content size for placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayMetrics {
    pub row_height: f32,
    pub char_width: f32,
    pub padding: f32,
}

impl Default for OverlayMetrics {
    fn default() -> Self {
        Self {
            row_height: 20.0,
            char_width: 8.0,
            padding: 8.0,
        }
    }
}

impl OverlayView {
    /// Build the view for `active`, or `None` when the anchor is not on screen.
    pub fn build(
        active: &ActiveMatch,
        host: &dyn HostEditor,
        positioner: &PopupPositioner,
        metrics: OverlayMetrics,
    ) -> Option<Self> {
        let anchor = host.caret_to_screen(active.range.from)?;

        let rows: Vec<OverlayRow> = active
            .candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| OverlayRow {
                label: candidate.display_label().to_string(),
                detail: candidate.detail.clone(),
                highlighted: index == active.highlight,
            })
            .collect();

        let status = match (active.phase, rows.is_empty()) {
            (_, false) => OverlayStatus::Items,
            (Phase::Loading, true) => OverlayStatus::Loading,
            (Phase::Loaded, true) => OverlayStatus::NoResults,
        };

        let position = host.viewport().map(|viewport| {
            positioner.calculate_position(anchor, content_size(&rows, metrics), viewport)
        });

        Some(Self {
            kind: active.kind,
            query: active.query.clone(),
            anchor,
            position,
            decoration: active.range,
            rows,
            status,
        })
    }

    pub fn highlighted(&self) -> Option<&OverlayRow> {
        self.rows.iter().find(|row| row.highlighted)
    }
}

fn content_size(rows: &[OverlayRow], metrics: OverlayMetrics) -> Size {
    let widest = rows
        .iter()
        .map(|row| {
            row.label.chars().count() + row.detail.as_ref().map_or(0, |d| d.chars().count() + 1)
        })
        .max()
        .unwrap_or(0);

    #[allow(clippy::cast_precision_loss)]
    let size = Size::new(
        widest as f32 * metrics.char_width + metrics.padding * 2.0,
        rows.len().max(1) as f32 * metrics.row_height + metrics.padding * 2.0,
    );
    size
}

/// Paints the suggestion panel and the range decoration
pub trait OverlayRenderer {
    fn show(&mut self, view: &OverlayView);

    /// Remove the panel and the decoration
    fn hide(&mut self);
}

/// Renderer that stores the latest view for a host to paint later
///
/// Clones share the slot, so the engine can own one while the host's draw
/// loop reads from another.
#[derive(Debug, Clone, Default)]
pub struct OverlaySlot {
    inner: Arc<Mutex<SlotState>>,
}

#[derive(Debug, Default)]
struct SlotState {
    view: Option<OverlayView>,
    shows: usize,
    hides: usize,
}

impl OverlaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<OverlayView> {
        self.inner.lock().view.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.lock().view.is_some()
    }

    pub fn show_count(&self) -> usize {
        self.inner.lock().shows
    }

    pub fn hide_count(&self) -> usize {
        self.inner.lock().hides
    }
}

impl OverlayRenderer for OverlaySlot {
    fn show(&mut self, view: &OverlayView) {
        let mut inner = self.inner.lock();
        inner.view = Some(view.clone());
        inner.shows += 1;
    }

    fn hide(&mut self) {
        let mut inner = self.inner.lock();
        inner.view = None;
        inner.hides += 1;
    }
}
