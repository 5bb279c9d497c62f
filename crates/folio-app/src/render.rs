//! Plain-text renderer: draws the page state onto any `io::Write`.

use std::io::{self, Write};

use folio_terminal::{LineKind, Scrollback, ScrollbackLine, SequenceState};

use crate::app_state::{AppContext, Phase};
use crate::easter_egg::EASTER_EGG_MESSAGE;

/// A line redrawn in place with `\r` while a typewriter fills it.
#[derive(Default)]
struct LiveLine {
    step: Option<usize>,
    text: String,
    open: bool,
}

impl LiveLine {
    fn update<W: Write>(&mut self, out: &mut W, step: usize, text: &str) -> io::Result<()> {
        if self.step != Some(step) {
            if self.open {
                writeln!(out)?;
            }
            self.step = Some(step);
            self.text.clear();
        }
        if text != self.text {
            write!(out, "\r{text}")?;
            self.text.clear();
            self.text.push_str(text);
            self.open = true;
        }
        Ok(())
    }

    fn close<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.open {
            writeln!(out)?;
            self.open = false;
        }
        Ok(())
    }
}

/// Incremental renderer. Each `frame` call writes only what changed.
pub struct TextRenderer<W: Write> {
    out: W,
    prompt: String,
    echo_commands: bool,
    boot: LiveLine,
    boot_closed: bool,
    hero: LiveLine,
    hero_closed: bool,
    printed_lines: usize,
    /// Scroll position as of the last frame.
    view_top: usize,
    easter_egg_shown: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, prompt: &str) -> Self {
        Self {
            out,
            prompt: prompt.to_string(),
            echo_commands: true,
            boot: LiveLine::default(),
            boot_closed: false,
            hero: LiveLine::default(),
            hero_closed: false,
            printed_lines: 0,
            view_top: 0,
            easter_egg_shown: false,
        }
    }

    /// Stop echoing command lines (the user's terminal already shows them).
    pub fn set_echo_commands(&mut self, echo: bool) {
        self.echo_commands = echo;
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write a block of text followed by a newline.
    pub fn block(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Show the input prompt without a trailing newline.
    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{} ", self.prompt)?;
        self.out.flush()
    }

    pub fn frame(&mut self, ctx: &AppContext) -> io::Result<()> {
        if ctx.phase == Phase::Loading {
            if let SequenceState::Running(i) = ctx.boot.state() {
                self.boot.update(&mut self.out, i, ctx.boot.display_text())?;
            }
        } else if !self.boot_closed {
            self.boot.close(&mut self.out)?;
            self.boot_closed = true;
        }

        match ctx.hero.state() {
            SequenceState::Running(i) => {
                self.hero.update(&mut self.out, i, ctx.hero.display_text())?;
            },
            SequenceState::Done | SequenceState::Cancelled if !self.hero_closed => {
                if let Some((i, last)) = ctx.hero.steps().iter().enumerate().next_back() {
                    self.hero.update(&mut self.out, i, last.revealed())?;
                }
                self.hero.close(&mut self.out)?;
                self.hero_closed = true;
            },
            _ => {},
        }

        // Terminal rows wait until the hero lines are finished drawing.
        if self.hero_closed {
            let sb = &ctx.scrollback;
            if sb.len() > self.printed_lines {
                for line in &sb.lines()[self.printed_lines..] {
                    self.scrollback_line(line, self.echo_commands)?;
                }
                self.printed_lines = sb.len();
            } else if sb.scroll_top() != self.view_top {
                self.viewport(sb)?;
            }
            self.view_top = sb.scroll_top();
        }

        if ctx.easter_egg_visible && !self.easter_egg_shown {
            writeln!(self.out)?;
            for row in EASTER_EGG_MESSAGE.lines() {
                writeln!(self.out, "    {row}")?;
            }
            writeln!(self.out)?;
            self.easter_egg_shown = true;
        } else if !ctx.easter_egg_visible {
            self.easter_egg_shown = false;
        }

        self.out.flush()
    }

    /// Redraw the rows inside the scrollback viewport under a position header.
    fn viewport(&mut self, sb: &Scrollback) -> io::Result<()> {
        let visible = sb.visible();
        let first = sb.scroll_top() + 1;
        writeln!(
            self.out,
            "-- lines {first}-{} of {} --",
            sb.scroll_top() + visible.len(),
            sb.len()
        )?;
        for line in visible {
            self.scrollback_line(line, true)?;
        }
        Ok(())
    }

    fn scrollback_line(&mut self, line: &ScrollbackLine, echo: bool) -> io::Result<()> {
        match line.kind() {
            LineKind::Command => {
                if echo {
                    writeln!(self.out, "{} {}", self.prompt, line.text())?;
                }
            },
            LineKind::Output => {
                for row in line.text().lines() {
                    writeln!(self.out, "{row}")?;
                }
            },
        }
        Ok(())
    }
}
