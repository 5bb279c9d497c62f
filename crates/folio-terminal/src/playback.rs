//! Scripted playback: replays a fixed list of commands into a scrollback.
//!
//! Driven by `tick(dt_ms)`. Command `i` is appended once `(i + 1) * delay`
//! milliseconds have elapsed since `start()`.

use std::rc::Rc;

use crate::cancel::CancelToken;
use crate::interpreter::CommandTable;
use crate::scrollback::Scrollback;

/// Ordered commands with a fixed inter-command delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackScript {
    pub commands: Vec<String>,
    pub delay_ms: u32,
}

impl PlaybackScript {
    pub fn new<I, S>(commands: I, delay_ms: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            delay_ms,
        }
    }
}

/// Lifecycle of a playback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running { index: usize, elapsed_ms: u32 },
    Done,
    Cancelled,
}

/// Plays a [`PlaybackScript`] once. Not restartable.
pub struct Playback {
    script: PlaybackScript,
    state: PlaybackState,
    responses: Option<Rc<CommandTable>>,
    cancel: Option<CancelToken>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Playback {
    pub fn new(script: PlaybackScript) -> Self {
        Self {
            script,
            state: PlaybackState::Idle,
            responses: None,
            cancel: None,
            on_complete: None,
        }
    }

    /// Also append each command's resolved output after its command line.
    pub fn with_responses(mut self, table: Rc<CommandTable>) -> Self {
        self.responses = Some(table);
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Callback fired exactly once, in the tick that appends the last command.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PlaybackState::Running { .. })
    }

    pub fn is_done(&self) -> bool {
        self.state == PlaybackState::Done
    }

    /// Begin playback. Ignored unless idle.
    pub fn start(&mut self) {
        if self.state != PlaybackState::Idle {
            log::debug!("playback start ignored in state {:?}", self.state);
            return;
        }
        log::debug!(
            "playback started: {} commands, {}ms apart",
            self.script.commands.len(),
            self.script.delay_ms
        );
        self.state = PlaybackState::Running {
            index: 0,
            elapsed_ms: 0,
        };
    }

    /// Advance virtual time by `dt_ms`, appending every command that falls due.
    pub fn tick(&mut self, dt_ms: u32, view: &mut Scrollback) -> PlaybackState {
        let PlaybackState::Running {
            mut index,
            elapsed_ms,
        } = self.state
        else {
            return self.state;
        };

        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            log::warn!("playback cancelled after {index} commands");
            self.state = PlaybackState::Cancelled;
            self.on_complete = None;
            return self.state;
        }

        let mut elapsed = elapsed_ms.saturating_add(dt_ms);
        let delay = self.script.delay_ms;
        while index < self.script.commands.len() && elapsed >= delay {
            let command = &self.script.commands[index];
            view.push_command(command.as_str());
            if let Some(table) = &self.responses {
                let output = table.resolve(command);
                if !output.is_empty() {
                    view.push_output(output);
                }
            }
            elapsed -= delay;
            index += 1;
        }

        if index >= self.script.commands.len() {
            self.finish();
        } else {
            self.state = PlaybackState::Running {
                index,
                elapsed_ms: elapsed,
            };
        }
        self.state
    }

    fn finish(&mut self) {
        self.state = PlaybackState::Done;
        log::info!("playback finished");
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::builtin_table;
    use crate::scrollback::LineKind;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let fired = Rc::new(Cell::new(0));
        let handle = Rc::clone(&fired);
        (fired, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn two_commands_one_second_apart() {
        let (fired, cb) = counter();
        let mut pb = Playback::new(PlaybackScript::new(["a", "b"], 1000)).on_complete(cb);
        let mut view = Scrollback::new(12);
        pb.start();

        pb.tick(999, &mut view);
        assert!(view.is_empty());

        pb.tick(1, &mut view);
        assert_eq!(view.len(), 1);
        assert_eq!(view.lines()[0].text(), "a");
        assert_eq!(view.lines()[0].kind(), LineKind::Command);
        assert_eq!(fired.get(), 0);

        pb.tick(999, &mut view);
        assert_eq!(view.len(), 1);
        assert_eq!(fired.get(), 0);

        pb.tick(1, &mut view);
        assert_eq!(view.len(), 2);
        assert_eq!(view.lines()[1].text(), "b");
        assert_eq!(fired.get(), 1);
        assert!(pb.is_done());

        pb.tick(5000, &mut view);
        assert_eq!(view.len(), 2);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn large_tick_catches_up_in_order() {
        let (fired, cb) = counter();
        let mut pb = Playback::new(PlaybackScript::new(["x", "y", "z"], 100)).on_complete(cb);
        let mut view = Scrollback::new(12);
        pb.start();
        pb.tick(250, &mut view);
        let texts: Vec<&str> = view.lines().iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["x", "y"]);
        assert_eq!(
            pb.state(),
            PlaybackState::Running {
                index: 2,
                elapsed_ms: 50
            }
        );
        pb.tick(50, &mut view);
        assert_eq!(view.len(), 3);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn idle_until_started() {
        let mut pb = Playback::new(PlaybackScript::new(["a"], 10));
        let mut view = Scrollback::new(12);
        assert_eq!(pb.tick(100, &mut view), PlaybackState::Idle);
        assert!(view.is_empty());
    }

    #[test]
    fn not_restartable() {
        let mut pb = Playback::new(PlaybackScript::new(["a"], 10));
        let mut view = Scrollback::new(12);
        pb.start();
        pb.tick(10, &mut view);
        assert!(pb.is_done());
        pb.start();
        pb.tick(10, &mut view);
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn empty_script_completes_on_first_tick() {
        let (fired, cb) = counter();
        let mut pb = Playback::new(PlaybackScript::new(Vec::<String>::new(), 1000)).on_complete(cb);
        let mut view = Scrollback::new(12);
        pb.start();
        assert_eq!(fired.get(), 0);
        pb.tick(0, &mut view);
        assert_eq!(fired.get(), 1);
        assert!(view.is_empty());
    }

    #[test]
    fn cancel_stops_without_callback() {
        let (fired, cb) = counter();
        let token = CancelToken::new();
        let mut pb = Playback::new(PlaybackScript::new(["a", "b"], 1000))
            .with_cancel(token.clone())
            .on_complete(cb);
        let mut view = Scrollback::new(12);
        pb.start();
        pb.tick(1000, &mut view);
        token.cancel();
        assert_eq!(pb.tick(1000, &mut view), PlaybackState::Cancelled);
        pb.tick(1000, &mut view);
        assert_eq!(view.len(), 1);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn responses_follow_commands() {
        let mut pb = Playback::new(PlaybackScript::new(["pwd", "clear"], 10))
            .with_responses(Rc::new(builtin_table()));
        let mut view = Scrollback::new(12);
        pb.start();
        pb.tick(20, &mut view);
        let texts: Vec<&str> = view.lines().iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["pwd", "/home/anuj/portfolio", "clear"]);
    }

    #[test]
    fn zero_delay_plays_everything_at_once() {
        let mut pb = Playback::new(PlaybackScript::new(["a", "b", "c"], 0));
        let mut view = Scrollback::new(12);
        pb.start();
        pb.tick(0, &mut view);
        assert_eq!(view.len(), 3);
        assert!(pb.is_done());
    }
}
