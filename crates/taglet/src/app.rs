// ABOUTME: Demo application state: the line document, the engine and the message history
// ABOUTME: Routes crossterm key events through the engine before normal editing

use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event as TerminalEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use taglet_core::{
    AutocompleteConfig, FetchUpdate, MentionAutocomplete, OverlayMetrics, OverlaySlot,
    OverlayView, PopupConstraints, PopupPlacement, PopupPositioner, SuggestionSource,
};
use taglet_events::RecordingBus;
use taglet_logging::{PerfStats, debug};
use taglet_types::Key;

use crate::document::{ChipStyle, LineDocument};

const FETCH_OPERATION: &str = "suggestion_fetch";

/// Panel geometry in terminal cells
fn cell_positioner() -> (PopupPositioner, OverlayMetrics) {
    let constraints = PopupConstraints {
        margin: 0.0,
        max_width: 48.0,
        max_height: 10.0,
        min_width: 20.0,
        min_height: 3.0,
        line_height: 1.0,
        placement: PopupPlacement::Auto,
    };
    let metrics = OverlayMetrics {
        row_height: 1.0,
        char_width: 1.0,
        padding: 1.0,
    };
    (PopupPositioner::new(constraints), metrics)
}

pub struct App {
    document: LineDocument,
    engine: MentionAutocomplete,
    overlay: OverlaySlot,
    bus: RecordingBus,
    history: Vec<String>,
    fetch_stats: PerfStats,
    last_event: Option<&'static str>,
    should_quit: bool,
}

impl App {
    /// Must be called inside a tokio runtime.
    pub fn new(config: &AutocompleteConfig, source: Arc<dyn SuggestionSource>) -> Result<Self> {
        let overlay = OverlaySlot::new();
        let bus = RecordingBus::new();
        let (positioner, metrics) = cell_positioner();

        let engine = MentionAutocomplete::new(config.clone(), source, Box::new(overlay.clone()))
            .context("Failed to create autocomplete engine")?
            .with_event_bus(Box::new(bus.clone()))
            .with_positioner(positioner, metrics);

        Ok(Self {
            document: LineDocument::with_chips(ChipStyle::from_config(config)),
            engine,
            overlay,
            bus,
            history: Vec::new(),
            fetch_stats: PerfStats::default(),
            last_event: None,
            should_quit: false,
        })
    }

    pub fn document(&self) -> &LineDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut LineDocument {
        &mut self.document
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_autocomplete_active(&self) -> bool {
        self.engine.is_active()
    }

    /// What the panel currently shows, if anything
    pub fn overlay_view(&self) -> Option<OverlayView> {
        self.overlay.current()
    }

    pub fn handle_terminal_event(&mut self, event: TerminalEvent) {
        if let TerminalEvent::Key(key) = event {
            self.handle_key(key);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        let engine_key = to_engine_key(&key);
        if self.engine.handle_key_down(engine_key, &mut self.document) {
            // Accepting replaced text; rematch so the engine sees the new caret
            if engine_key == Key::Enter {
                self.engine.handle_document_change(&self.document);
            }
            self.drain_events();
            return;
        }

        let extend = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char(ch) if !ctrl => self.document.insert_char(ch),
            KeyCode::Backspace => self.document.backspace(),
            KeyCode::Delete => self.document.delete_forward(),
            KeyCode::Left => self.document.move_left(extend),
            KeyCode::Right => self.document.move_right(extend),
            KeyCode::Home => self.document.move_home(extend),
            KeyCode::End => self.document.move_end(extend),
            KeyCode::Enter => self.submit_line(),
            _ => return,
        }

        self.engine.handle_document_change(&self.document);
        self.drain_events();
    }

    /// Wait for the next fetch lifecycle update from the engine.
    pub async fn next_fetch_update(&mut self) -> Option<FetchUpdate> {
        self.engine.next_fetch_update().await
    }

    pub fn apply_fetch_update(&mut self, update: FetchUpdate) {
        if let FetchUpdate::Completed(outcome) = &update {
            self.fetch_stats
                .record_operation(FETCH_OPERATION, outcome.elapsed);
        }
        self.engine.apply_fetch_update(update, &self.document);
        self.drain_events();
    }

    /// Apply every update that is already waiting
    pub fn pump_fetch_updates(&mut self) {
        while let Some(update) = self.engine.try_next_fetch_update() {
            self.apply_fetch_update(update);
        }
    }

    pub fn status_line(&self) -> String {
        let last = self.last_event.unwrap_or("idle");
        match self.fetch_stats.get_stats(FETCH_OPERATION) {
            Some((count, _, avg)) => format!(
                " {last} | fetches: {count} (avg {}ms) | Ctrl-C to quit",
                avg.as_millis()
            ),
            None => format!(" {last} | Ctrl-C to quit"),
        }
    }

    /// Stop the engine and hide the panel
    pub fn shutdown(&mut self) {
        self.engine.teardown();
        self.drain_events();
    }

    fn submit_line(&mut self) {
        let line = self.document.take_line();
        if !line.trim().is_empty() {
            debug!(line = %line, "Submitted message");
            self.history.push(line);
        }
    }

    fn drain_events(&mut self) {
        if let Some(event) = self.bus.drain().last() {
            self.last_event = Some(event.name());
        }
    }
}

/// Translate a crossterm key into the engine's host-neutral key
pub fn to_engine_key(key: &KeyEvent) -> Key {
    match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => Key::Char(ch),
        _ => Key::Other,
    }
}
