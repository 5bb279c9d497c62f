//! Typewriter reveal: shows a string one character at a time.

use crate::cancel::CancelToken;
use crate::sequence::{Step, StepStatus};

/// Lifecycle of a typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterState {
    Idle,
    Typing,
    /// Fully revealed, waiting out the settle delay.
    Settling,
    Done,
    Cancelled,
}

/// Reveals `text` at `char_delay_ms` per character, then waits `settle_ms`
/// before reporting completion.
///
/// Character `k` (1-based) appears at `k * char_delay_ms`. The typewriter
/// owns its sink, so no two reveals can interleave into the same text.
pub struct Typewriter {
    chars: Vec<char>,
    /// How many of `chars` are in `revealed`.
    shown: usize,
    revealed: String,
    char_delay_ms: u32,
    settle_ms: u32,
    elapsed_ms: u64,
    state: TypewriterState,
    cancel: Option<CancelToken>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Typewriter {
    pub fn new(text: &str, char_delay_ms: u32, settle_ms: u32) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
            revealed: String::with_capacity(text.len()),
            char_delay_ms,
            settle_ms,
            elapsed_ms: 0,
            state: TypewriterState::Idle,
            cancel: None,
            on_complete: None,
        }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Callback fired once, after the settle delay.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    /// The full target text.
    pub fn target(&self) -> String {
        self.chars.iter().collect()
    }

    /// Revealed prefix.
    pub fn revealed(&self) -> &str {
        &self.revealed
    }

    /// Total time from start to completion.
    pub fn duration_ms(&self) -> u64 {
        self.chars.len() as u64 * u64::from(self.char_delay_ms) + u64::from(self.settle_ms)
    }

    pub fn start(&mut self) {
        if self.state != TypewriterState::Idle {
            log::debug!("typewriter start ignored in state {:?}", self.state);
            return;
        }
        self.revealed.clear();
        self.shown = 0;
        self.elapsed_ms = 0;
        self.state = TypewriterState::Typing;
    }

    pub fn tick(&mut self, dt_ms: u32) -> StepStatus {
        match self.state {
            TypewriterState::Idle => return StepStatus::Pending,
            TypewriterState::Done => return StepStatus::Done { leftover_ms: dt_ms },
            TypewriterState::Cancelled => return StepStatus::Cancelled,
            TypewriterState::Typing | TypewriterState::Settling => {},
        }

        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            log::warn!("typewriter cancelled at {} chars", self.shown);
            self.state = TypewriterState::Cancelled;
            self.on_complete = None;
            return StepStatus::Cancelled;
        }

        self.elapsed_ms += u64::from(dt_ms);

        let total = self.chars.len();
        let due = if self.char_delay_ms == 0 {
            total
        } else {
            let n = self.elapsed_ms / u64::from(self.char_delay_ms);
            usize::try_from(n).map_or(total, |n| n.min(total))
        };
        if due > self.shown {
            self.revealed.extend(&self.chars[self.shown..due]);
            self.shown = due;
        }
        if due == total {
            self.state = TypewriterState::Settling;
        }

        let duration = self.duration_ms();
        if self.elapsed_ms >= duration {
            let leftover = self.elapsed_ms - duration;
            self.state = TypewriterState::Done;
            if let Some(callback) = self.on_complete.take() {
                callback();
            }
            StepStatus::Done {
                leftover_ms: u32::try_from(leftover).unwrap_or(u32::MAX),
            }
        } else {
            StepStatus::Running
        }
    }
}

impl Step for Typewriter {
    fn start(&mut self) {
        Typewriter::start(self);
    }

    fn advance(&mut self, dt_ms: u32) -> StepStatus {
        self.tick(dt_ms)
    }

    fn text(&self) -> &str {
        &self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{Sequence, SequenceState};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn reveals_one_char_per_delay() {
        let fired = Rc::new(Cell::new(0));
        let handle = Rc::clone(&fired);
        let mut tw = Typewriter::new("AB", 40, 500).on_complete(move || handle.set(handle.get() + 1));
        tw.start();
        assert_eq!(tw.revealed(), "");

        tw.tick(39);
        assert_eq!(tw.revealed(), "");
        tw.tick(1);
        assert_eq!(tw.revealed(), "A");
        tw.tick(40);
        assert_eq!(tw.revealed(), "AB");
        assert_eq!(tw.state(), TypewriterState::Settling);

        tw.tick(499);
        assert_eq!(fired.get(), 0);
        assert_eq!(tw.tick(1), StepStatus::Done { leftover_ms: 0 });
        assert_eq!(fired.get(), 1);

        tw.tick(1000);
        assert_eq!(fired.get(), 1);
        assert_eq!(tw.revealed(), "AB");
    }

    #[test]
    fn multibyte_chars_count_once() {
        let mut tw = Typewriter::new("a•b", 10, 0);
        tw.start();
        tw.tick(20);
        assert_eq!(tw.revealed(), "a•");
        tw.tick(10);
        assert_eq!(tw.revealed(), "a•b");
        assert_eq!(tw.state(), TypewriterState::Done);
    }

    #[test]
    fn frame_sized_ticks_reveal_each_char_once() {
        let text = "Web • Mobile";
        let mut tw = Typewriter::new(text, 30, 0);
        tw.start();
        let mut lens = Vec::new();
        while tw.state() != TypewriterState::Done {
            tw.tick(16);
            lens.push(tw.revealed().chars().count());
        }
        assert_eq!(tw.revealed(), text);
        assert!(lens.windows(2).all(|w| w[1] - w[0] <= 1));
        assert_eq!(lens.last(), Some(&text.chars().count()));
    }

    #[test]
    fn big_tick_reports_leftover() {
        let mut tw = Typewriter::new("abc", 10, 5);
        tw.start();
        assert_eq!(tw.tick(100), StepStatus::Done { leftover_ms: 65 });
        assert_eq!(tw.revealed(), "abc");
    }

    #[test]
    fn empty_text_only_settles() {
        let mut tw = Typewriter::new("", 100, 500);
        tw.start();
        assert_eq!(tw.tick(499), StepStatus::Running);
        assert_eq!(tw.tick(1), StepStatus::Done { leftover_ms: 0 });
    }

    #[test]
    fn zero_delay_reveals_immediately() {
        let mut tw = Typewriter::new("hey", 0, 10);
        tw.start();
        tw.tick(0);
        assert_eq!(tw.revealed(), "hey");
        assert_eq!(tw.state(), TypewriterState::Settling);
    }

    #[test]
    fn start_is_not_restart() {
        let mut tw = Typewriter::new("ab", 10, 0);
        assert_eq!(tw.tick(50), StepStatus::Pending);
        tw.start();
        tw.tick(10);
        tw.start();
        assert_eq!(tw.revealed(), "a");
        tw.tick(10);
        assert_eq!(tw.revealed(), "ab");
    }

    #[test]
    fn cancel_freezes_text() {
        let token = CancelToken::new();
        let fired = Rc::new(Cell::new(false));
        let handle = Rc::clone(&fired);
        let mut tw = Typewriter::new("abcd", 10, 0)
            .with_cancel(token.clone())
            .on_complete(move || handle.set(true));
        tw.start();
        tw.tick(20);
        token.cancel();
        assert_eq!(tw.tick(100), StepStatus::Cancelled);
        assert_eq!(tw.revealed(), "ab");
        assert!(!fired.get());
    }

    #[test]
    fn chained_titles_start_after_previous_settles() {
        let mut seq = Sequence::new(vec![
            Typewriter::new("ANUJ", 100, 500),
            Typewriter::new("Dev", 50, 500),
        ]);
        seq.start();
        seq.tick(400);
        assert_eq!(seq.steps()[0].revealed(), "ANUJ");
        assert_eq!(seq.steps()[1].revealed(), "");
        // First line settles at 900ms; second has not begun before that.
        seq.tick(499);
        assert_eq!(seq.state(), SequenceState::Running(0));
        seq.tick(1);
        assert_eq!(seq.state(), SequenceState::Running(1));
        seq.tick(50);
        assert_eq!(seq.steps()[1].revealed(), "D");
        seq.tick(100 + 500);
        assert!(seq.is_done());
        assert_eq!(seq.display_text(), "Dev");
    }
}
