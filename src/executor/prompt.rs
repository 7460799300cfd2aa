//! Sub-prompt input seam.
//!
//! The export dispatcher and the importer read their answers through the
//! [`Prompter`] trait so the loops can be driven by scripted input in tests.
//! [`StdinPrompter`] is the plain standard-input implementation; the REPL
//! engine also implements the trait so interactive sub-prompts get line
//! editing and history.

use std::io::{self, Write};

use crate::error::{Result, ShellError};

/// Source of answers for sub-prompts.
pub trait Prompter {
    /// Display a message and read one trimmed line of input.
    fn ask(&mut self, message: &str) -> Result<String>;
}

/// Prompter reading from standard input.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, message: &str) -> Result<String> {
        print!("{message}");
        io::stdout()
            .flush()
            .map_err(|e| ShellError::Generic(format!("Failed to flush stdout: {e}")))?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .map_err(|e| ShellError::Generic(format!("Failed to read input: {e}")))?;

        Ok(input.trim().to_string())
    }
}

/// Prompt for confirmation of a destructive action.
///
/// Only an explicit `yes` (case-insensitive) confirms; any other answer
/// declines.
///
/// # Arguments
/// * `prompter` - Answer source
/// * `message` - Confirmation message
///
/// # Returns
/// * `Result<bool>` - True if the user confirmed
pub fn confirm(prompter: &mut dyn Prompter, message: &str) -> Result<bool> {
    let answer = prompter.ask(message)?;
    Ok(answer.eq_ignore_ascii_case("yes"))
}

/// Scripted prompter for tests: returns canned answers in order.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of unconsumed answers.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, _message: &str) -> Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| ShellError::Generic("scripted prompter exhausted".to_string()))
    }
}
