//! Host-agnostic input event types.
//!
//! Every host maps its native input to these enums. The terminal crate
//! never sees raw keyboard input.

use serde::{Deserialize, Serialize};

/// A host-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A navigation / action button pressed.
    ButtonPress(Button),
    /// Character typed into the focused input.
    TextInput(char),
    /// Backspace / delete-left.
    Backspace,
    /// User requested quit (EOF, window close, etc.).
    Quit,
}

/// Buttons that map across all hosts.
///
/// `Confirm` is the enter key: it submits the current input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
}

impl Button {
    /// Parse a button from its lower-case key name (`"up"`, `"enter"`, ...).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "enter" | "confirm" => Some(Self::Confirm),
            "esc" | "escape" | "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}
