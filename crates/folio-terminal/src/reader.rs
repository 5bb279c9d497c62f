//! Interactive line reader bound to a text input.

use std::rc::Rc;

use folio_types::input::{Button, InputEvent};

use crate::interpreter::CommandTable;
use crate::scrollback::Scrollback;

/// What a single input event did to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderAction {
    /// Event was not meant for the reader.
    Ignored,
    /// The input buffer changed.
    Edited,
    /// A line was submitted; `output` is false when the command printed nothing.
    Submitted { output: bool },
}

/// Reads one line per submission and appends command/output pairs.
pub struct LineReader {
    table: Rc<CommandTable>,
    buffer: String,
}

impl LineReader {
    pub fn new(table: Rc<CommandTable>) -> Self {
        Self {
            table,
            buffer: String::new(),
        }
    }

    /// Current (unsubmitted) input.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Prompt row with the pending input and a cursor.
    pub fn prompt_line(&self, prompt: &str) -> String {
        format!("{prompt} {}_", self.buffer)
    }

    /// Feed one input event.
    pub fn handle_input(&mut self, event: &InputEvent, view: &mut Scrollback) -> ReaderAction {
        match event {
            InputEvent::TextInput(ch) if !ch.is_control() => {
                self.buffer.push(*ch);
                ReaderAction::Edited
            },
            InputEvent::Backspace => {
                if self.buffer.pop().is_some() {
                    ReaderAction::Edited
                } else {
                    ReaderAction::Ignored
                }
            },
            InputEvent::ButtonPress(Button::Confirm) => self.submit(view),
            _ => ReaderAction::Ignored,
        }
    }

    /// Submit the buffer: echo it verbatim, resolve, append any output.
    ///
    /// The buffer is cleared whatever the outcome.
    pub fn submit(&mut self, view: &mut Scrollback) -> ReaderAction {
        let line = std::mem::take(&mut self.buffer);
        let output = self.table.resolve(&line);
        view.push_command(line);
        let printed = !output.is_empty();
        if printed {
            view.push_output(output);
        }
        view.scroll_to_bottom();
        ReaderAction::Submitted { output: printed }
    }
}
