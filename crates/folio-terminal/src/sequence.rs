//! Strictly sequential chain of timed steps.
//!
//! A [`Sequence`] starts step `n + 1` only after step `n` reports
//! [`StepStatus::Done`]. Time left over from the tick that finished a step
//! carries into the next one, so a chain behaves the same whatever the
//! host's frame size.

use crate::cancel::CancelToken;

/// Result of advancing a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Not started yet.
    Pending,
    Running,
    /// Finished; `leftover_ms` of the last tick was not needed.
    Done { leftover_ms: u32 },
    Cancelled,
}

/// A timed unit of work driven by virtual time.
pub trait Step {
    /// Begin the step. Ignored unless the step is still pending.
    fn start(&mut self);

    /// Advance by `dt_ms`.
    fn advance(&mut self, dt_ms: u32) -> StepStatus;

    /// Text the step currently displays.
    fn text(&self) -> &str;
}

/// Lifecycle of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    Idle,
    Running(usize),
    Done,
    Cancelled,
}

/// Runs steps one after another. Not restartable.
pub struct Sequence<S: Step> {
    steps: Vec<S>,
    state: SequenceState,
    cancel: Option<CancelToken>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl<S: Step> Sequence<S> {
    pub fn new(steps: Vec<S>) -> Self {
        Self {
            steps,
            state: SequenceState::Idle,
            cancel: None,
            on_complete: None,
        }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Callback fired once, after the last step is done.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == SequenceState::Done
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    /// The step currently running, if any.
    pub fn current(&self) -> Option<&S> {
        match self.state {
            SequenceState::Running(i) => self.steps.get(i),
            _ => None,
        }
    }

    /// Text for a single shared sink: the running step's text, or the
    /// last step's once the sequence is done.
    pub fn display_text(&self) -> &str {
        match self.state {
            SequenceState::Running(i) => self.steps.get(i).map_or("", |s| s.text()),
            SequenceState::Done => self.steps.last().map_or("", |s| s.text()),
            SequenceState::Idle | SequenceState::Cancelled => "",
        }
    }

    pub fn start(&mut self) {
        if self.state != SequenceState::Idle {
            log::debug!("sequence start ignored in state {:?}", self.state);
            return;
        }
        if let Some(first) = self.steps.first_mut() {
            first.start();
        }
        self.state = SequenceState::Running(0);
    }

    /// Advance the running step, chaining into later steps as they finish.
    pub fn tick(&mut self, dt_ms: u32) -> SequenceState {
        let SequenceState::Running(mut index) = self.state else {
            return self.state;
        };

        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            log::warn!("sequence cancelled at step {index}");
            self.state = SequenceState::Cancelled;
            self.on_complete = None;
            return self.state;
        }

        let mut budget = dt_ms;
        loop {
            let Some(step) = self.steps.get_mut(index) else {
                self.finish();
                break;
            };
            match step.advance(budget) {
                StepStatus::Done { leftover_ms } => {
                    log::debug!("sequence step {index} done");
                    index += 1;
                    budget = leftover_ms;
                    if let Some(next) = self.steps.get_mut(index) {
                        next.start();
                    }
                },
                StepStatus::Cancelled => {
                    self.state = SequenceState::Cancelled;
                    self.on_complete = None;
                    break;
                },
                StepStatus::Pending | StepStatus::Running => {
                    self.state = SequenceState::Running(index);
                    break;
                },
            }
        }
        self.state
    }

    fn finish(&mut self) {
        self.state = SequenceState::Done;
        log::info!("sequence of {} steps finished", self.steps.len());
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }
}
