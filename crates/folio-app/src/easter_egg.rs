//! Konami code detector.

use folio_types::input::{Button, InputEvent};

/// Message shown while the easter egg is active.
pub const EASTER_EGG_MESSAGE: &str = "🎉 Easter Egg Activated! 🎉\n\
You found the secret Linux command!\n\
sudo apt install awesome-skills";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Up,
    Down,
    Left,
    Right,
    B,
    A,
}

const SEQUENCE: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::B,
    Key::A,
];

fn key_of(event: &InputEvent) -> Option<Key> {
    match event {
        InputEvent::ButtonPress(Button::Up) => Some(Key::Up),
        InputEvent::ButtonPress(Button::Down) => Some(Key::Down),
        InputEvent::ButtonPress(Button::Left) => Some(Key::Left),
        InputEvent::ButtonPress(Button::Right) => Some(Key::Right),
        InputEvent::TextInput('b' | 'B') => Some(Key::B),
        InputEvent::TextInput('a' | 'A') => Some(Key::A),
        _ => None,
    }
}

/// Tracks progress through the Konami sequence.
#[derive(Debug, Default)]
pub struct KonamiDetector {
    progress: usize,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key. Returns true when the sequence just completed.
    ///
    /// Any key that is not the expected next one resets progress to zero.
    pub fn feed(&mut self, event: &InputEvent) -> bool {
        if matches!(event, InputEvent::Quit) {
            return false;
        }
        if key_of(event) == Some(SEQUENCE[self.progress]) {
            self.progress += 1;
            if self.progress == SEQUENCE.len() {
                self.progress = 0;
                return true;
            }
        } else {
            self.progress = 0;
        }
        false
    }

    #[cfg(test)]
    pub fn progress(&self) -> usize {
        self.progress
    }
}
