//! Prompt capability shared by the selector, reader, and write flows.

use crate::error::CoreResult;

/// Blocking user-input provider.
///
/// Implementations return [`CoreError::Cancelled`](crate::error::CoreError::Cancelled)
/// when the user backs out (Esc, Ctrl-C, closed input).
pub trait Prompter {
    /// Single choice from `choices`; returns the chosen index.
    fn select(&mut self, message: &str, choices: &[String]) -> CoreResult<usize>;

    /// Free-form line of text without its trailing newline.
    fn input(&mut self, message: &str) -> CoreResult<String>;

    /// Pager "continue?" question; same contract as [`input`](Self::input),
    /// rendered in the [`Tone::Prompt`](crate::prompt::Tone::Prompt) color
    /// where the front end has colors.
    fn continue_input(&mut self, message: &str) -> CoreResult<String> {
        self.input(message)
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn select(&mut self, message: &str, choices: &[String]) -> CoreResult<usize> {
        (**self).select(message, choices)
    }

    fn input(&mut self, message: &str) -> CoreResult<String> {
        (**self).input(message)
    }

    fn continue_input(&mut self, message: &str) -> CoreResult<String> {
        (**self).continue_input(message)
    }
}
