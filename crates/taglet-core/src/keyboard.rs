// ABOUTME: Maps key presses to autocomplete actions while the panel is active
// ABOUTME: Only navigation keys are claimed; everything else reaches the editor

use taglet_types::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompleteAction {
    SelectPrevious,
    SelectNext,
    Accept,
    Dismiss,
}

impl AutocompleteAction {
    /// The action a key claims, if the autocomplete is active.
    pub fn for_key(key: Key, active: bool) -> Option<Self> {
        if !active {
            return None;
        }

        match key {
            Key::Up => Some(AutocompleteAction::SelectPrevious),
            Key::Down => Some(AutocompleteAction::SelectNext),
            Key::Enter => Some(AutocompleteAction::Accept),
            Key::Escape => Some(AutocompleteAction::Dismiss),
            Key::Char(_) | Key::Other => None,
        }
    }
}
