// ABOUTME: The autocomplete engine one host editor embeds
// ABOUTME: Wires trigger matching, debounced fetching, overlay rendering, keys and commits

use std::sync::Arc;
use taglet_events::{DeactivationReason, Event, EventBus};
use taglet_logging::{debug, error, info, instrument, trace, warn};
use taglet_types::Key;
use tokio::sync::mpsc;

use crate::commit::commit_candidate;
use crate::config::AutocompleteConfig;
use crate::debouncer::{DebounceConfig, Scheduler, TokioScheduler};
use crate::error::AutocompleteError;
use crate::fetcher::{FetchOutcome, FetchUpdate, FetcherConfig, SuggestionFetcher, SuggestionSource};
use crate::host::HostEditor;
use crate::keyboard::AutocompleteAction;
use crate::overlay::{OverlayMetrics, OverlayRenderer, OverlayView};
use crate::popup::PopupPositioner;
use crate::state::{AutocompleteState, MatchTransition};
use crate::trigger::TriggerMatcher;

/// Mention and tag autocomplete for a single editor instance.
///
/// The host drives it from its event loop:
/// - call [`handle_document_change`](Self::handle_document_change) after every
///   edit or caret move,
/// - offer every key to [`handle_key_down`](Self::handle_key_down) before
///   normal editing sees it,
/// - drain [`next_fetch_update`](Self::next_fetch_update) and pass each update
///   to [`apply_fetch_update`](Self::apply_fetch_update).
pub struct MentionAutocomplete {
    config: AutocompleteConfig,
    matcher: TriggerMatcher,
    state: AutocompleteState,
    fetcher: SuggestionFetcher,
    updates: mpsc::UnboundedReceiver<FetchUpdate>,
    renderer: Box<dyn OverlayRenderer>,
    positioner: PopupPositioner,
    metrics: OverlayMetrics,
    bus: Option<Box<dyn EventBus>>,
}

impl MentionAutocomplete {
    /// Create an engine that schedules fetches on the current tokio runtime.
    pub fn new(
        config: AutocompleteConfig,
        source: Arc<dyn SuggestionSource>,
        renderer: Box<dyn OverlayRenderer>,
    ) -> Result<Self, AutocompleteError> {
        let scheduler = TokioScheduler::current()?;
        Self::with_scheduler(config, source, renderer, Box::new(scheduler))
    }

    pub fn with_scheduler(
        config: AutocompleteConfig,
        source: Arc<dyn SuggestionSource>,
        renderer: Box<dyn OverlayRenderer>,
        scheduler: Box<dyn Scheduler>,
    ) -> Result<Self, AutocompleteError> {
        let matcher = TriggerMatcher::new(&config)?;

        let fetcher_config = FetcherConfig {
            debounce: DebounceConfig {
                delay: config.debounce(),
                max_delay: config.max_debounce(),
                immediate: false,
            },
            max_candidates: config.max_candidates,
            slow_fetch_threshold: config.slow_fetch_threshold(),
        };
        let (fetcher, updates) = SuggestionFetcher::new(source, scheduler, fetcher_config);

        Ok(Self {
            config,
            matcher,
            state: AutocompleteState::default(),
            fetcher,
            updates,
            renderer,
            positioner: PopupPositioner::default(),
            metrics: OverlayMetrics::default(),
            bus: None,
        })
    }

    pub fn with_event_bus(mut self, bus: Box<dyn EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Placement rules and the units the host measures the screen in
    pub fn with_positioner(mut self, positioner: PopupPositioner, metrics: OverlayMetrics) -> Self {
        self.positioner = positioner;
        self.metrics = metrics;
        self
    }

    pub fn state(&self) -> &AutocompleteState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    /// Re-run matching after an edit or caret move.
    #[instrument(skip_all)]
    pub fn handle_document_change(&mut self, host: &dyn HostEditor) {
        if !host.selection().is_empty() {
            self.deactivate(DeactivationReason::Selection);
            return;
        }

        let block_start = host.block_start();
        let text = host.text_before_caret(block_start);

        let Some(matched) = self.matcher.find(&text, block_start) else {
            self.deactivate(DeactivationReason::NoMatch);
            return;
        };

        let (kind, range, query) = (matched.kind, matched.range, matched.query.clone());

        match self.state.apply_match(matched) {
            MatchTransition::Activated => {
                debug!(kind = %kind, range = %range, query = %query, "Autocomplete activated");
                self.publish(Event::Activated {
                    kind,
                    range,
                    query: query.clone(),
                });
            }
            MatchTransition::Updated { kind_changed } => {
                trace!(kind = %kind, range = %range, query = %query, kind_changed, "Autocomplete query changed");
                self.publish(Event::QueryChanged {
                    kind,
                    range,
                    query: query.clone(),
                    kind_changed,
                });
            }
        }

        self.fetcher.request(kind, query.clone(), range);
        self.publish(Event::FetchScheduled { kind, query });

        self.render(host);
    }

    /// Offer a key press to the autocomplete. Returns `true` when it was consumed.
    #[instrument(skip(self, host))]
    pub fn handle_key_down(&mut self, key: Key, host: &mut dyn HostEditor) -> bool {
        let Some(action) = AutocompleteAction::for_key(key, self.state.is_active()) else {
            return false;
        };

        match action {
            AutocompleteAction::SelectNext => {
                if let Some((from, to)) = self.state.select_next() {
                    self.publish(Event::HighlightMoved { from, to });
                    self.render(&*host);
                }
            }
            AutocompleteAction::SelectPrevious => {
                if let Some((from, to)) = self.state.select_previous() {
                    self.publish(Event::HighlightMoved { from, to });
                    self.render(&*host);
                }
            }
            AutocompleteAction::Accept => self.accept(host),
            AutocompleteAction::Dismiss => self.deactivate(DeactivationReason::Escape),
        }

        true
    }

    /// Wait for the next progress report from a fired fetch.
    pub async fn next_fetch_update(&mut self) -> Option<FetchUpdate> {
        self.updates.recv().await
    }

    pub fn try_next_fetch_update(&mut self) -> Option<FetchUpdate> {
        self.updates.try_recv().ok()
    }

    #[instrument(skip_all)]
    pub fn apply_fetch_update(&mut self, update: FetchUpdate, host: &dyn HostEditor) {
        match update {
            FetchUpdate::Started(request) => {
                self.publish(Event::FetchStarted {
                    request_id: request.id,
                    kind: request.kind,
                    query: request.query,
                });
            }
            FetchUpdate::Completed(outcome) => self.apply_fetch_outcome(outcome, host),
        }
    }

    /// Apply results only if they were fetched for the match that is live right now.
    pub fn apply_fetch_outcome(&mut self, outcome: FetchOutcome, host: &dyn HostEditor) {
        let FetchOutcome {
            request,
            result,
            elapsed,
        } = outcome;

        let is_current = self
            .state
            .active()
            .is_some_and(|active| active.is_current(request.kind, &request.query, request.range));

        if !is_current {
            trace!(request_id = %request.id, query = %request.query, "Dropping stale suggestions");
            self.publish(Event::StaleResultsDropped {
                request_id: request.id,
                query: request.query,
            });
            return;
        }

        let candidates = match result {
            Ok(candidates) => {
                debug!(
                    request_id = %request.id,
                    count = candidates.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Applying suggestions"
                );
                self.publish(Event::ResultsApplied {
                    request_id: request.id,
                    count: candidates.len(),
                });
                candidates
            }
            Err(err) => {
                warn!(request_id = %request.id, query = %request.query, error = %err, "Suggestion fetch failed");
                self.publish(Event::FetchFailed {
                    request_id: request.id,
                    message: err.to_string(),
                });
                Vec::new()
            }
        };

        self.state.apply_results(candidates);
        self.render(host);
    }

    /// Hide everything and stop pending work; the editor is going away.
    pub fn teardown(&mut self) {
        self.fetcher.cancel_pending();
        self.state.deactivate();
        self.renderer.hide();
        self.publish(Event::Deactivated {
            reason: DeactivationReason::Teardown,
        });
    }

    fn accept(&mut self, host: &mut dyn HostEditor) {
        let Some(active) = self.state.active() else {
            return;
        };
        let Some(candidate) = active.highlighted().cloned() else {
            debug!(query = %active.query, "Enter with no candidates, nothing to commit");
            return;
        };
        let (kind, range) = (active.kind, active.range);

        match commit_candidate(host, kind, range, &candidate) {
            Ok(commit) => {
                info!(kind = %kind, range = %range, candidate = %candidate.id, caret = commit.caret, "Committed suggestion");
                self.publish(Event::Committed {
                    kind,
                    range,
                    candidate_id: candidate.id,
                });
            }
            Err(err) => {
                error!(kind = %kind, range = %range, error = %err, "Host rejected commit");
                self.publish(Event::CommitFailed {
                    range,
                    message: err.to_string(),
                });
            }
        }

        self.deactivate(DeactivationReason::Committed);
    }

    fn deactivate(&mut self, reason: DeactivationReason) {
        if !self.state.deactivate() {
            return;
        }
        self.fetcher.cancel_pending();
        self.renderer.hide();
        debug!(?reason, "Autocomplete deactivated");
        self.publish(Event::Deactivated { reason });
    }

    fn render(&mut self, host: &dyn HostEditor) {
        let Some(active) = self.state.active() else {
            self.renderer.hide();
            return;
        };

        match OverlayView::build(active, host, &self.positioner, self.metrics) {
            Some(view) => self.renderer.show(&view),
            None => {
                trace!(offset = active.range.from, "Anchor not on screen, hiding overlay");
                self.renderer.hide();
            }
        }
    }

    fn publish(&self, event: Event) {
        if let Some(bus) = &self.bus {
            bus.dispatch(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::tests::ScriptedSource;
    use crate::overlay::{OverlaySlot, OverlayStatus};
    use crate::state::Phase;
    use crate::testing::{MemoryHost, NODE_CHAR};
    use std::time::Duration;
    use taglet_events::RecordingBus;
    use taglet_types::{InlineNode, TextRange, TriggerKind};

    struct Harness {
        engine: MentionAutocomplete,
        overlay: OverlaySlot,
        bus: RecordingBus,
        source: Arc<ScriptedSource>,
    }

    fn harness(source: ScriptedSource) -> Harness {
        harness_with(source, AutocompleteConfig::default())
    }

    fn harness_with(source: ScriptedSource, config: AutocompleteConfig) -> Harness {
        let source = Arc::new(source);
        let overlay = OverlaySlot::new();
        let bus = RecordingBus::new();
        let engine =
            MentionAutocomplete::new(config, source.clone(), Box::new(overlay.clone()))
                .unwrap()
                .with_event_bus(Box::new(bus.clone()));

        Harness {
            engine,
            overlay,
            bus,
            source,
        }
    }

    impl Harness {
        fn type_str(&mut self, host: &mut MemoryHost, text: &str) {
            for ch in text.chars() {
                host.type_str(&ch.to_string());
                self.engine.handle_document_change(&*host);
            }
        }

        /// Let timers fire and apply every update that arrives
        async fn settle(&mut self, host: &MemoryHost, wait: Duration) {
            tokio::time::sleep(wait).await;
            while let Some(update) = self.engine.try_next_fetch_update() {
                self.engine.apply_fetch_update(update, host);
            }
        }

        fn labels(&self) -> Vec<String> {
            self.engine
                .state()
                .active()
                .map(|a| {
                    a.candidates
                        .iter()
                        .map(|c| c.display_label().to_string())
                        .collect()
                })
                .unwrap_or_default()
        }

        fn highlight(&self) -> Option<usize> {
            self.engine.state().active().map(|a| a.highlight)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_a_mention_activates_and_fetches_once() {
        let mut h = harness(ScriptedSource::answering(&[(
            "ser",
            &["server.rs", "service.ts"],
        )]));
        let mut host = MemoryHost::default();

        h.type_str(&mut host, "@ser");
        let active = h.engine.state().active().unwrap();
        assert_eq!(active.range, TextRange::new(0, 4));
        assert_eq!(active.query, "ser");
        assert_eq!(active.phase, Phase::Loading);
        assert_eq!(h.overlay.current().unwrap().status, OverlayStatus::Loading);

        h.settle(&host, Duration::from_millis(600)).await;

        assert_eq!(
            *h.source.calls.lock(),
            vec![(TriggerKind::Mention, "ser".to_string())]
        );
        assert_eq!(h.labels(), vec!["server.rs", "service.ts"]);
        assert_eq!(h.overlay.current().unwrap().status, OverlayStatus::Items);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_results_are_dropped() {
        let source = ScriptedSource::answering(&[("ab", &["stale"]), ("abc", &["fresh"])])
            .with_delay("ab", Duration::from_secs(3));
        let mut h = harness(source);
        let mut host = MemoryHost::default();

        h.type_str(&mut host, "@ab");
        // "ab" fires at 500ms and hangs for 3s
        h.settle(&host, Duration::from_millis(600)).await;
        h.type_str(&mut host, "c");
        h.settle(&host, Duration::from_millis(600)).await;
        assert_eq!(h.labels(), vec!["fresh"]);

        h.settle(&host, Duration::from_secs(3)).await;
        assert_eq!(h.labels(), vec!["fresh"]);
        assert!(
            h.bus
                .events()
                .iter()
                .any(|e| matches!(e, Event::StaleResultsDropped { query, .. } if query == "ab"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_for_old_range_are_stale() {
        let mut h = harness(ScriptedSource::answering(&[("a", &["alpha"])]));
        let mut host = MemoryHost::default();

        h.type_str(&mut host, "@a");
        // Same query, but a prefix inserted before the trigger moves the range
        host.set_caret(0);
        host.type_str("x ");
        host.set_caret(4);
        h.engine.handle_document_change(&host);
        assert_eq!(
            h.engine.state().active().unwrap().range,
            TextRange::new(2, 4)
        );

        let outcome = FetchOutcome {
            request: crate::fetcher::FetchRequest {
                id: taglet_events::FetchRequestId::new(99),
                kind: TriggerKind::Mention,
                query: "a".into(),
                range: TextRange::new(0, 2),
            },
            result: Ok(vec![taglet_types::Candidate::labeled("old")]),
            elapsed: Duration::ZERO,
        };
        h.engine.apply_fetch_outcome(outcome, &host);
        assert!(h.labels().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_candidates_persist_while_refining_query() {
        let mut h = harness(ScriptedSource::answering(&[
            ("s", &["server.rs", "service.ts", "setup.py"]),
            ("se", &["service.ts"]),
        ]));
        let mut host = MemoryHost::default();

        h.type_str(&mut host, "@s");
        h.settle(&host, Duration::from_millis(600)).await;
        h.engine.handle_key_down(Key::Down, &mut host);
        assert_eq!(h.highlight(), Some(1));

        h.type_str(&mut host, "e");
        // Old list and highlight stay until new results land
        assert_eq!(h.labels().len(), 3);
        assert_eq!(h.highlight(), Some(1));

        h.settle(&host, Duration::from_millis(600)).await;
        assert_eq!(h.labels(), vec!["service.ts"]);
        assert_eq!(h.highlight(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_kind_change_clears_candidates() {
        let mut h = harness(ScriptedSource::answering(&[("", &["one", "two"])]));
        let mut host = MemoryHost::default();

        h.type_str(&mut host, "@");
        h.settle(&host, Duration::from_millis(600)).await;
        assert_eq!(h.labels().len(), 2);

        // Replace "@" with "#" in one edit
        host.slots.clear();
        host.set_caret(0);
        host.type_str("#");
        h.engine.handle_document_change(&host);

        let active = h.engine.state().active().unwrap();
        assert_eq!(active.kind, TriggerKind::Tag);
        assert!(active.candidates.is_empty());
        assert!(h.bus.events().iter().any(|e| matches!(
            e,
            Event::QueryChanged {
                kind_changed: true,
                ..
            }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_moving_caret_away_deactivates() {
        let mut h = harness(ScriptedSource::default());
        let mut host = MemoryHost::default();

        h.type_str(&mut host, "hi @jo");
        assert!(h.engine.is_active());

        host.set_caret(2);
        h.engine.handle_document_change(&host);
        assert!(!h.engine.is_active());
        assert!(!h.overlay.is_visible());
        assert_eq!(
            h.bus.last(),
            Some(Event::Deactivated {
                reason: DeactivationReason::NoMatch
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_deactivation_cancels_pending_fetch() {
        let mut h = harness(ScriptedSource::default());
        let mut host = MemoryHost::default();

        h.type_str(&mut host, "@jo ");
        assert!(!h.engine.is_active());

        h.settle(&host, Duration::from_secs(2)).await;
        assert!(h.source.calls.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_deactivates() {
        let mut h = harness(ScriptedSource::default());
        let mut host = MemoryHost::default();

        h.type_str(&mut host, "@wo");
        assert!(h.engine.is_active());

        host.select(0, 3);
        h.engine.handle_document_change(&host);
        assert!(!h.engine.is_active());
        assert_eq!(
            h.bus.last(),
            Some(Event::Deactivated {
                reason: DeactivationReason::Selection
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_highlight_wraps_through_keys() {
        let mut h = harness(ScriptedSource::answering(&[("", &["a", "b", "c"])]));
        let mut host = MemoryHost::default();

        h.type_str(&mut host, "#");
        h.settle(&host, Duration::from_millis(600)).await;

        assert!(h.engine.handle_key_down(Key::Up, &mut host));
        assert_eq!(h.highlight(), Some(2));
        assert!(h.engine.handle_key_down(Key::Down, &mut host));
        assert_eq!(h.highlight(), Some(0));

        let view = h.overlay.current().unwrap();
        assert_eq!(view.highlighted().map(|r| r.label.as_str()), Some("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_deactivates_without_editing() {
        let mut h = harness(ScriptedSource::answering(&[("wor", &["world"])]));
        let mut host = MemoryHost::with_text("hello ");
        h.type_str(&mut host, "@wor");
        h.settle(&host, Duration::from_millis(600)).await;

        let before = host.text();
        assert!(h.engine.handle_key_down(Key::Escape, &mut host));

        assert!(!h.engine.is_active());
        assert!(!h.overlay.is_visible());
        assert_eq!(host.text(), before);
        assert!(host.edits.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_fall_through_when_inactive() {
        let mut h = harness(ScriptedSource::default());
        let mut host = MemoryHost::with_text("plain");
        h.engine.handle_document_change(&host);

        for key in [Key::Up, Key::Down, Key::Enter, Key::Escape, Key::Char('x')] {
            assert!(!h.engine.handle_key_down(key, &mut host));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_keys_fall_through_when_active() {
        let mut h = harness(ScriptedSource::default());
        let mut host = MemoryHost::default();
        h.type_str(&mut host, "@a");

        assert!(!h.engine.handle_key_down(Key::Char('b'), &mut host));
        assert!(!h.engine.handle_key_down(Key::Other, &mut host));
        assert!(h.engine.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_with_no_candidates_is_consumed_without_edit() {
        let mut h = harness(ScriptedSource::default());
        let mut host = MemoryHost::default();
        h.type_str(&mut host, "@zzz");
        h.settle(&host, Duration::from_millis(600)).await;

        assert_eq!(h.overlay.current().unwrap().status, OverlayStatus::NoResults);
        assert!(h.engine.handle_key_down(Key::Enter, &mut host));
        assert!(host.edits.is_empty());
        assert_eq!(host.text(), "@zzz");
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_replaces_match_and_deactivates() {
        let mut h = harness(ScriptedSource::answering(&[("wor", &["world"])]));
        let mut host = MemoryHost::with_text("hello ");
        h.type_str(&mut host, "@wor");
        host.type_str(" world");
        host.set_caret(10);
        h.engine.handle_document_change(&host);
        h.settle(&host, Duration::from_millis(600)).await;

        assert!(h.engine.handle_key_down(Key::Enter, &mut host));

        assert_eq!(host.edits.len(), 1);
        assert_eq!(host.edits[0].0, TextRange::new(6, 10));
        assert_eq!(
            host.edits[0].1,
            InlineNode::Mention {
                id: "world".into(),
                label: "world".into()
            }
        );
        assert_eq!(host.text(), format!("hello {NODE_CHAR} world"));
        assert_eq!(host.selection.cursor(), 7);
        assert!(!h.engine.is_active());
        assert!(!h.overlay.is_visible());

        let names: Vec<_> = h.bus.events().iter().map(|e| e.name()).collect();
        assert!(names.ends_with(&["committed", "deactivated"]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_commit_still_deactivates() {
        let mut h = harness(ScriptedSource::answering(&[("jo", &["joan"])]));
        let mut host = MemoryHost::default();
        h.type_str(&mut host, "@jo");
        h.settle(&host, Duration::from_millis(600)).await;

        host.reject_edits = true;
        assert!(h.engine.handle_key_down(Key::Enter, &mut host));

        assert_eq!(host.text(), "@jo");
        assert!(!h.engine.is_active());
        assert!(!h.overlay.is_visible());
        assert!(
            h.bus
                .events()
                .iter()
                .any(|e| matches!(e, Event::CommitFailed { .. }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_shows_no_results() {
        let mut h = harness(ScriptedSource::default().failing_on("x"));
        let mut host = MemoryHost::default();
        h.type_str(&mut host, "@x");
        h.settle(&host, Duration::from_millis(600)).await;

        assert!(h.engine.is_active());
        assert_eq!(h.overlay.current().unwrap().status, OverlayStatus::NoResults);
        assert!(
            h.bus
                .events()
                .iter()
                .any(|e| matches!(e, Event::FetchFailed { .. }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_offscreen_anchor_hides_but_stays_active() {
        let mut h = harness(ScriptedSource::answering(&[("a", &["alpha", "beta"])]));
        let mut host = MemoryHost::default();
        h.type_str(&mut host, "@a");
        h.settle(&host, Duration::from_millis(600)).await;
        assert!(h.overlay.is_visible());

        host.offscreen = true;
        h.engine.handle_document_change(&host);
        assert!(h.engine.is_active());
        assert!(!h.overlay.is_visible());

        assert!(h.engine.handle_key_down(Key::Down, &mut host));
        assert_eq!(h.highlight(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_matching_is_block_relative() {
        let mut h = harness(ScriptedSource::default());
        let mut host = MemoryHost::with_text("first @line\n");
        h.type_str(&mut host, "#t");

        let active = h.engine.state().active().unwrap();
        assert_eq!(active.kind, TriggerKind::Tag);
        assert_eq!(active.range, TextRange::new(12, 14));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_hides_and_reports() {
        let mut h = harness(ScriptedSource::default());
        let mut host = MemoryHost::default();
        h.type_str(&mut host, "@a");

        h.engine.teardown();
        assert!(!h.engine.is_active());
        assert!(!h.overlay.is_visible());
        assert_eq!(
            h.bus.last(),
            Some(Event::Deactivated {
                reason: DeactivationReason::Teardown
            })
        );

        h.settle(&host, Duration::from_secs(2)).await;
        assert!(h.source.calls.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_mentions_follow_config() {
        let config = AutocompleteConfig {
            allow_spaces_in_mentions: true,
            ..Default::default()
        };
        let mut h = harness_with(ScriptedSource::default(), config);
        let mut host = MemoryHost::default();

        h.type_str(&mut host, "@jane do");
        assert_eq!(h.engine.state().active().unwrap().query, "jane do");
    }

    #[test]
    fn test_new_requires_runtime() {
        let result = MentionAutocomplete::new(
            AutocompleteConfig::default(),
            Arc::new(ScriptedSource::default()),
            Box::new(OverlaySlot::new()),
        );
        assert!(matches!(result, Err(AutocompleteError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config = AutocompleteConfig {
            tag_trigger: '@',
            ..Default::default()
        };
        let result = MentionAutocomplete::new(
            config,
            Arc::new(ScriptedSource::default()),
            Box::new(OverlaySlot::new()),
        );
        assert!(matches!(result, Err(AutocompleteError::Config(_))));
    }
}
