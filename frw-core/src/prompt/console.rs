//! Colored line output for file contents and flow messages.

use std::io::{self, Stdout, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    tty::IsTty,
};

use crate::error::{CoreError, CoreResult};

/// Color role of a printed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// File contents and hints
    Info,
    /// Questions
    Prompt,
    Success,
    Error,
}

impl Tone {
    pub(crate) const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Prompt => Color::Blue,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }
}

pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl Console<Stdout> {
    /// Stdout, colored only when attached to a terminal.
    #[must_use]
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_tty();

        Self::new(out, color)
    }
}

impl<W: Write> Console<W> {
    pub const fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn line(&mut self, tone: Tone, text: &str) -> CoreResult<()> {
        self.write_styled(tone, text)
            .and_then(|()| self.out.write_all(b"\n"))
            .map_err(|e| CoreError::terminal(&e))
    }

    pub fn blank(&mut self) -> CoreResult<()> {
        self.out.write_all(b"\n").map_err(|e| CoreError::terminal(&e))
    }

    pub fn flush(&mut self) -> CoreResult<()> {
        self.out.flush().map_err(|e| CoreError::terminal(&e))
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_styled(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        if self.color {
            queue!(self.out, SetForegroundColor(tone.color()), Print(text), ResetColor)
        } else {
            self.out.write_all(text.as_bytes())
        }
    }
}
