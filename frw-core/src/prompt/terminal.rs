//! crossterm-backed [`Prompter`]: arrow-key choice lists and line input.

use std::io::{self, BufRead, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveToColumn, MoveUp, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::prompt::{console::Tone, traits::Prompter};

/// Rows of a choice list shown at once.
const MAX_VISIBLE: usize = 15;

/// Restores cooked mode even when a key read fails.
struct RawModeGuard;

impl RawModeGuard {
    fn enter(out: &mut Stdout) -> CoreResult<Self> {
        enable_raw_mode().map_err(|e| CoreError::terminal(&e))?;
        execute!(out, Hide).map_err(|e| CoreError::terminal(&e))?;

        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), Show) {
            warn!("Failed to show cursor: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
    }
}

/// What a key press does to an open choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKey {
    Up,
    Down,
    Submit,
    Abort,
    Ignore,
}

impl From<KeyEvent> for ListKey {
    fn from(key: KeyEvent) -> Self {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Self::Abort,
            (KeyCode::Esc, _) => Self::Abort,
            (KeyCode::Up | KeyCode::Char('k'), _) => Self::Up,
            (KeyCode::Down | KeyCode::Char('j'), _) => Self::Down,
            (KeyCode::Enter, _) => Self::Submit,
            _ => Self::Ignore,
        }
    }
}

/// Cursor and scroll window over a choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListView {
    selected: usize,
    offset: usize,
    visible: usize,
    len: usize,
}

impl ListView {
    fn new(len: usize, rows: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            visible: len.min(rows).min(MAX_VISIBLE).max(1),
            len,
        }
    }

    fn up(&mut self) {
        self.selected = if self.selected == 0 { self.len - 1 } else { self.selected - 1 };
        self.follow();
    }

    fn down(&mut self) {
        self.selected = (self.selected + 1) % self.len;
        self.follow();
    }

    fn follow(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.visible {
            self.offset = self.selected + 1 - self.visible;
        }
    }
}

pub struct TerminalPrompter {
    out: Stdout,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    #[must_use]
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    fn question(&mut self, message: &str) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Color::Green),
            Print("? "),
            ResetColor,
            Print(message),
        )
    }

    fn read_answer(&mut self) -> CoreResult<String> {
        self.out.flush().map_err(|e| CoreError::terminal(&e))?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| CoreError::terminal(&e))?;

        if read == 0 {
            return Err(CoreError::Cancelled);
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn draw_list(&mut self, choices: &[String], view: &ListView) -> io::Result<()> {
        for (idx, choice) in choices.iter().enumerate().skip(view.offset).take(view.visible) {
            queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;

            if idx == view.selected {
                queue!(
                    self.out,
                    SetForegroundColor(Color::Green),
                    Print("> "),
                    Print(choice),
                    ResetColor,
                )?;
            } else {
                queue!(self.out, Print("  "), Print(choice))?;
            }
            queue!(self.out, Print("\r\n"))?;
        }

        self.out.flush()
    }

    fn rewind_list(&mut self, view: &ListView) -> io::Result<()> {
        let rows = u16::try_from(view.visible).unwrap_or(u16::MAX);
        queue!(self.out, MoveUp(rows))
    }

    fn run_list(&mut self, choices: &[String]) -> CoreResult<usize> {
        let rows = terminal::size()
            .map(|(_, h)| usize::from(h).saturating_sub(2))
            .unwrap_or(MAX_VISIBLE);
        let mut view = ListView::new(choices.len(), rows);

        let _guard = RawModeGuard::enter(&mut self.out)?;

        loop {
            self.draw_list(choices, &view).map_err(|e| CoreError::terminal(&e))?;

            let key = match event::read().map_err(|e| CoreError::terminal(&e))? {
                Event::Key(key) if key.kind == KeyEventKind::Press => ListKey::from(key),
                _ => ListKey::Ignore,
            };

            match key {
                ListKey::Submit => return Ok(view.selected),
                ListKey::Abort => return Err(CoreError::Cancelled),
                ListKey::Up => view.up(),
                ListKey::Down => view.down(),
                ListKey::Ignore => {}
            }

            self.rewind_list(&view).map_err(|e| CoreError::terminal(&e))?;
        }
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, choices: &[String]) -> CoreResult<usize> {
        if choices.is_empty() {
            return Err(CoreError::invalid_input("choices", "nothing to choose from"));
        }

        self.question(message)
            .and_then(|()| queue!(self.out, Print("\n")))
            .map_err(|e| CoreError::terminal(&e))?;

        let picked = self.run_list(choices);

        if let Ok(idx) = picked {
            debug!("Selected choice {}: {}", idx, choices[idx]);
            queue!(
                self.out,
                SetForegroundColor(Color::Cyan),
                Print(format!("  {}\n", choices[idx])),
                ResetColor,
            )
            .and_then(|()| self.out.flush())
            .map_err(|e| CoreError::terminal(&e))?;
        }

        picked
    }

    fn input(&mut self, message: &str) -> CoreResult<String> {
        self.question(message)
            .and_then(|()| queue!(self.out, Print(": ")))
            .map_err(|e| CoreError::terminal(&e))?;

        self.read_answer()
    }

    fn continue_input(&mut self, message: &str) -> CoreResult<String> {
        queue!(
            self.out,
            SetForegroundColor(Tone::Prompt.color()),
            Print(message),
            ResetColor,
            Print(" "),
        )
        .map_err(|e| CoreError::terminal(&e))?;

        self.read_answer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_view_wraps_both_ways() {
        let mut view = ListView::new(3, 10);

        view.up();
        assert_eq!(view.selected, 2);
        view.down();
        assert_eq!(view.selected, 0);
    }

    #[test]
    fn test_list_view_scrolls_window() {
        let mut view = ListView::new(10, 3);
        assert_eq!(view.visible, 3);

        for _ in 0..4 {
            view.down();
        }
        assert_eq!(view.selected, 4);
        assert_eq!(view.offset, 2);

        view.up();
        view.up();
        view.up();
        assert_eq!(view.selected, 1);
        assert_eq!(view.offset, 1);
    }

    #[test]
    fn test_key_mapping() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);

        assert_eq!(ListKey::from(esc), ListKey::Abort);
        assert_eq!(ListKey::from(ctrl_c), ListKey::Abort);
        assert_eq!(ListKey::from(j), ListKey::Down);
    }
}
