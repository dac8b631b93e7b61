//! Line-based answers to prompts.
//!
//! Every prompt in the explorer reads exactly one line. [`LineSource`]
//! abstracts where that line comes from so the prompt loops can be driven
//! by a script in tests.

use std::io::{BufRead as _, IsTerminal as _};

use dialoguer::Input;

use crate::CliError;

/// Something that can answer a prompt with one line of text.
pub trait LineSource {
    /// Shows `prompt` and returns the answer without its line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InputClosed`] when no more input will arrive, or
    /// an I/O error from the underlying terminal.
    fn read_line(&mut self, prompt: &str) -> Result<String, CliError>;
}

/// Reads answers from the user's terminal.
///
/// Uses `dialoguer` when stdin is a terminal. When stdin is piped, the
/// prompt is echoed and lines are read verbatim so scripted sessions work.
pub struct TerminalInput {
    interactive: bool,
}

impl TerminalInput {
    /// Detects whether stdin is attached to a terminal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal(),
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, CliError> {
        if self.interactive {
            let answer: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            return Ok(answer);
        }

        println!("{prompt}");
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }
}

#[cfg(test)]
pub mod scripted {
    use std::collections::VecDeque;

    use super::LineSource;
    use crate::CliError;

    /// Answers prompts from a fixed list and records every prompt shown.
    #[derive(Debug, Default)]
    pub struct ScriptedInput {
        answers: VecDeque<String>,
        pub prompts: Vec<String>,
    }

    impl ScriptedInput {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| (*a).to_string()).collect(),
                prompts: Vec::new(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }
    }

    impl LineSource for ScriptedInput {
        fn read_line(&mut self, prompt: &str) -> Result<String, CliError> {
            self.prompts.push(prompt.to_string());
            self.answers.pop_front().ok_or(CliError::InputClosed)
        }
    }
}
