//! Canned answers for driving flows in tests.

use std::collections::VecDeque;

use crate::error::{CoreError, CoreResult};
use crate::prompt::traits::Prompter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Pick the choice whose label contains this text.
    Choose(&'static str),
    Text(String),
    Cancel,
}

/// Replays [`Answer`]s in order and records every question asked.
/// Running out of answers behaves like closed input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub asked: Vec<String>,
    pub offered: Vec<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn texts<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(lines.into_iter().map(|l| Answer::Text(l.to_string())))
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, choices: &[String]) -> CoreResult<usize> {
        self.asked.push(message.to_string());
        self.offered.push(choices.to_vec());

        match self.answers.pop_front() {
            Some(Answer::Choose(needle)) => choices
                .iter()
                .position(|c| c.contains(needle))
                .ok_or_else(|| CoreError::invalid_input("choice", needle)),
            Some(Answer::Text(text)) => Err(CoreError::invalid_input("choice", &text)),
            Some(Answer::Cancel) | None => Err(CoreError::Cancelled),
        }
    }

    fn input(&mut self, message: &str) -> CoreResult<String> {
        self.asked.push(message.to_string());

        match self.answers.pop_front() {
            Some(Answer::Text(text)) => Ok(text),
            Some(Answer::Choose(label)) => Err(CoreError::invalid_input("text", label)),
            Some(Answer::Cancel) | None => Err(CoreError::Cancelled),
        }
    }
}
