// ABOUTME: Host-neutral key representation for the keyboard interceptor
// ABOUTME: Hosts translate their native key events into this enum

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
    /// A printable character
    Char(char),
    /// Anything else (modifiers, function keys, backspace, ...)
    Other,
}
