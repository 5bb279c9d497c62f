//! Append-only scrollback of command and output lines.
//!
//! Drivers never hold on to a `Scrollback`; they borrow it mutably for the
//! duration of one call. Only one driver can therefore write to a view at
//! any moment.

/// What a scrollback line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// An echoed command, rendered after the prompt.
    Command,
    /// Text produced by a command.
    Output,
}

/// One rendered entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollbackLine {
    kind: LineKind,
    text: String,
}

impl ScrollbackLine {
    pub fn command(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Command,
            text: text.into(),
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Output,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, oldest-first list of lines with a scroll position.
#[derive(Debug, Clone)]
pub struct Scrollback {
    lines: Vec<ScrollbackLine>,
    viewport_lines: usize,
    scroll_top: usize,
}

impl Scrollback {
    /// Create an empty scrollback showing `viewport_lines` rows at a time.
    pub fn new(viewport_lines: usize) -> Self {
        Self {
            lines: Vec::new(),
            viewport_lines: viewport_lines.max(1),
            scroll_top: 0,
        }
    }

    /// Append a line and scroll so it is visible.
    pub fn push(&mut self, line: ScrollbackLine) {
        self.lines.push(line);
        self.scroll_to_bottom();
    }

    pub fn push_command(&mut self, text: impl Into<String>) {
        self.push(ScrollbackLine::command(text));
    }

    pub fn push_output(&mut self, text: impl Into<String>) {
        self.push(ScrollbackLine::output(text));
    }

    pub fn lines(&self) -> &[ScrollbackLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&ScrollbackLine> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn viewport_lines(&self) -> usize {
        self.viewport_lines
    }

    /// Index of the first visible line.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Largest valid scroll position.
    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_lines)
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.max_scroll();
    }

    /// Scroll by `delta` lines (negative is up), clamped to the valid range.
    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll_top.saturating_add_signed(delta);
        self.scroll_top = target.min(self.max_scroll());
    }

    /// Lines currently inside the viewport.
    pub fn visible(&self) -> &[ScrollbackLine] {
        let end = (self.scroll_top + self.viewport_lines).min(self.lines.len());
        &self.lines[self.scroll_top..end]
    }
}
