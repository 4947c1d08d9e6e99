// ABOUTME: The single mutable autocomplete state owned by one engine instance
// ABOUTME: Holds the live match, its candidates and the highlighted index

use taglet_types::{Candidate, MatchResult, TextRange, TriggerKind};

/// Whether results have arrived since the panel opened (or switched kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMatch {
    pub kind: TriggerKind,
    pub range: TextRange,
    pub query: String,
    pub candidates: Vec<Candidate>,
    /// Always `< max(1, candidates.len())`
    pub highlight: usize,
    pub phase: Phase,
}

impl ActiveMatch {
    fn fresh(matched: MatchResult) -> Self {
        Self {
            kind: matched.kind,
            range: matched.range,
            query: matched.query,
            candidates: Vec::new(),
            highlight: 0,
            phase: Phase::Loading,
        }
    }

    pub fn highlighted(&self) -> Option<&Candidate> {
        self.candidates.get(self.highlight)
    }

    /// Same kind, query and range as the current match
    pub fn is_current(&self, kind: TriggerKind, query: &str, range: TextRange) -> bool {
        self.kind == kind && self.query == query && self.range == range
    }
}

/// Result of feeding a fresh match into the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTransition {
    Activated,
    Updated { kind_changed: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AutocompleteState {
    #[default]
    Inactive,
    Active(ActiveMatch),
}

impl AutocompleteState {
    pub fn is_active(&self) -> bool {
        matches!(self, AutocompleteState::Active(_))
    }

    pub fn active(&self) -> Option<&ActiveMatch> {
        match self {
            AutocompleteState::Active(active) => Some(active),
            AutocompleteState::Inactive => None,
        }
    }

    /// Replace the match. Candidates survive unless the trigger kind changed.
    pub fn apply_match(&mut self, matched: MatchResult) -> MatchTransition {
        match self {
            AutocompleteState::Inactive => {
                *self = AutocompleteState::Active(ActiveMatch::fresh(matched));
                MatchTransition::Activated
            }
            AutocompleteState::Active(active) => {
                let kind_changed = active.kind != matched.kind;
                if kind_changed {
                    *active = ActiveMatch::fresh(matched);
                } else {
                    active.range = matched.range;
                    active.query = matched.query;
                }
                MatchTransition::Updated { kind_changed }
            }
        }
    }

    /// Returns whether the state was active
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.is_active();
        *self = AutocompleteState::Inactive;
        was_active
    }

    /// Install a fresh candidate list and move the highlight to the top
    pub fn apply_results(&mut self, candidates: Vec<Candidate>) {
        if let AutocompleteState::Active(active) = self {
            active.candidates = candidates;
            active.highlight = 0;
            active.phase = Phase::Loaded;
        }
    }

    /// Returns `(from, to)` when the highlight moved
    pub fn select_next(&mut self) -> Option<(usize, usize)> {
        self.move_highlight(|index, len| (index + 1) % len)
    }

    pub fn select_previous(&mut self) -> Option<(usize, usize)> {
        self.move_highlight(|index, len| (index + len - 1) % len)
    }

    fn move_highlight(&mut self, step: impl Fn(usize, usize) -> usize) -> Option<(usize, usize)> {
        let AutocompleteState::Active(active) = self else {
            return None;
        };
        let len = active.candidates.len();
        if len == 0 {
            return None;
        }
        let from = active.highlight;
        active.highlight = step(from, len);
        Some((from, active.highlight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(from: usize, to: usize, query: &str) -> MatchResult {
        MatchResult::new(TriggerKind::Mention, TextRange::new(from, to), query)
    }

    fn with_candidates(labels: &[&str]) -> AutocompleteState {
        let mut state = AutocompleteState::default();
        state.apply_match(mention(0, 1, ""));
        state.apply_results(labels.iter().map(|l| Candidate::labeled(*l)).collect());
        state
    }

    #[test]
    fn test_starts_inactive() {
        let state = AutocompleteState::default();
        assert!(!state.is_active());
        assert!(state.active().is_none());
    }

    #[test]
    fn test_activation_starts_loading() {
        let mut state = AutocompleteState::default();
        assert_eq!(
            state.apply_match(mention(0, 4, "ser")),
            MatchTransition::Activated
        );

        let active = state.active().unwrap();
        assert_eq!(active.phase, Phase::Loading);
        assert!(active.candidates.is_empty());
        assert_eq!(active.highlight, 0);
    }

    #[test]
    fn test_same_kind_keeps_candidates() {
        let mut state = with_candidates(&["a", "b", "c"]);
        state.select_next();

        let transition = state.apply_match(mention(0, 3, "ab"));
        assert_eq!(
            transition,
            MatchTransition::Updated {
                kind_changed: false
            }
        );

        let active = state.active().unwrap();
        assert_eq!(active.query, "ab");
        assert_eq!(active.range, TextRange::new(0, 3));
        assert_eq!(active.candidates.len(), 3);
        assert_eq!(active.highlight, 1);
        assert_eq!(active.phase, Phase::Loaded);
    }

    #[test]
    fn test_kind_change_resets_candidates() {
        let mut state = with_candidates(&["a", "b"]);
        state.select_next();

        let transition =
            state.apply_match(MatchResult::new(TriggerKind::Tag, TextRange::new(0, 2), "b"));
        assert_eq!(transition, MatchTransition::Updated { kind_changed: true });

        let active = state.active().unwrap();
        assert!(active.candidates.is_empty());
        assert_eq!(active.highlight, 0);
        assert_eq!(active.phase, Phase::Loading);
    }

    #[test]
    fn test_highlight_wraps() {
        let mut state = with_candidates(&["a", "b", "c"]);
        state.select_next();
        state.select_next();
        assert_eq!(state.active().unwrap().highlight, 2);

        assert_eq!(state.select_next(), Some((2, 0)));
        assert_eq!(state.select_previous(), Some((0, 2)));
        assert_eq!(state.active().unwrap().highlighted().map(|c| c.id.as_str()), Some("c"));
    }

    #[test]
    fn test_navigation_without_candidates_is_noop() {
        let mut state = with_candidates(&[]);
        assert_eq!(state.select_next(), None);
        assert_eq!(state.select_previous(), None);
        assert_eq!(state.active().unwrap().highlight, 0);
        assert!(state.active().unwrap().highlighted().is_none());

        let mut inactive = AutocompleteState::default();
        assert_eq!(inactive.select_next(), None);
    }

    #[test]
    fn test_results_reset_highlight() {
        let mut state = with_candidates(&["a", "b", "c"]);
        state.select_previous();
        state.apply_results(vec![Candidate::labeled("x"), Candidate::labeled("y")]);
        assert_eq!(state.active().unwrap().highlight, 0);
    }

    #[test]
    fn test_results_ignored_when_inactive() {
        let mut state = AutocompleteState::default();
        state.apply_results(vec![Candidate::labeled("x")]);
        assert!(!state.is_active());
    }

    #[test]
    fn test_deactivate_reports_previous_state() {
        let mut state = with_candidates(&["a"]);
        assert!(state.deactivate());
        assert!(!state.deactivate());
        assert_eq!(state, AutocompleteState::Inactive);
    }

    #[test]
    fn test_is_current() {
        let state = with_candidates(&["a"]);
        let active = state.active().unwrap();
        assert!(active.is_current(TriggerKind::Mention, "", TextRange::new(0, 1)));
        assert!(!active.is_current(TriggerKind::Mention, "a", TextRange::new(0, 1)));
        assert!(!active.is_current(TriggerKind::Tag, "", TextRange::new(0, 1)));
        assert!(!active.is_current(TriggerKind::Mention, "", TextRange::new(1, 2)));
    }
}
