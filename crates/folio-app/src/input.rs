//! Turn stdin lines into input events and dispatch them.

use folio_types::input::{Button, InputEvent};

use crate::app_state::{AppContext, InputResult};

/// How a line read from stdin should be treated.
#[derive(Debug, Clone, PartialEq)]
pub enum LineInput {
    /// `:keys` followed by key names: pressed as bare keys.
    Keys(Vec<InputEvent>),
    /// A command typed into the terminal, ending with Confirm.
    Text(Vec<InputEvent>),
}

fn key_event(token: &str) -> Option<InputEvent> {
    match token {
        "b" | "a" => token.chars().next().map(InputEvent::TextInput),
        other => Button::from_key_name(other).map(InputEvent::ButtonPress),
    }
}

/// Prefix that turns a stdin line into bare key presses.
const KEYS_PREFIX: &str = ":keys";

/// Classify a stdin line.
///
/// `:keys up up down ...` presses each named key. Every other line,
/// including a bare `up`, is typed and submitted as a command.
pub fn parse_line(line: &str) -> LineInput {
    let lower = line.trim().to_lowercase();
    let rest = lower
        .strip_prefix(KEYS_PREFIX)
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));
    if let Some(rest) = rest {
        let keys: Option<Vec<InputEvent>> = rest.split_whitespace().map(key_event).collect();
        match keys {
            Some(keys) if !keys.is_empty() => return LineInput::Keys(keys),
            _ => log::debug!("not a key sequence: {line:?}"),
        }
    }

    let mut events: Vec<InputEvent> = line
        .trim_end_matches(['\r', '\n'])
        .chars()
        .map(InputEvent::TextInput)
        .collect();
    events.push(InputEvent::ButtonPress(Button::Confirm));
    LineInput::Text(events)
}

/// Feed one stdin line into the context.
pub fn dispatch_line(ctx: &mut AppContext, line: &str) -> InputResult {
    match parse_line(line) {
        LineInput::Keys(keys) => {
            log::debug!("key sequence of {} keys", keys.len());
            for key in &keys {
                if ctx.handle_key(key) == InputResult::Quit {
                    return InputResult::Quit;
                }
            }
        },
        LineInput::Text(events) => {
            for event in &events {
                if ctx.handle_input(event) == InputResult::Quit {
                    return InputResult::Quit;
                }
            }
        },
    }
    InputResult::Continue
}
