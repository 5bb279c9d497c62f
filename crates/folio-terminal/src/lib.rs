//! Command interpreter and playback engine for the folio terminal.
//!
//! The terminal is a table-based dispatch system. Commands are registered
//! once into an immutable [`CommandTable`]; resolution is a total function
//! from input text to display text. Timed effects (scripted playback,
//! typewriter reveals, sequential chains) are state machines driven by
//! `tick(dt_ms)` on a virtual clock.

mod cancel;
mod commands;
mod interpreter;
mod playback;
mod reader;
mod scrollback;
mod sequence;
mod timer;
mod typewriter;

/// Cooperative cancellation flag for timed drivers.
pub use cancel::CancelToken;
/// Stock table, builtin registration, and startup banner.
pub use commands::{builtin_table, register_builtins, welcome_banner};
/// A single canned command trait.
pub use interpreter::Command;
/// Immutable command table with total resolution.
pub use interpreter::{CommandTable, CommandTableBuilder, normalize, not_found_message};
/// Scripted command playback.
pub use playback::{Playback, PlaybackScript, PlaybackState};
/// Interactive line reader.
pub use reader::{LineReader, ReaderAction};
/// Append-only scrollback view.
pub use scrollback::{LineKind, Scrollback, ScrollbackLine};
/// Sequential step chains.
pub use sequence::{Sequence, SequenceState, Step, StepStatus};
/// Virtual-clock delayed events.
pub use timer::TimerQueue;
/// Character-by-character text reveal.
pub use typewriter::{Typewriter, TypewriterState};
