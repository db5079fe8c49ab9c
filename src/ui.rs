//! Terminal presentation, injected into the decision logic as a capability.
//!
//! The selector and the command flows only ever see the `Prompter` trait;
//! nothing below `main` knows whether a confirmation comes from an
//! interactive prompt or from `--yes`.

use anyhow::Result;
use dialoguer::{Confirm, Select};

pub trait Prompter {
    /// Ask a yes/no question. `yes_label`/`no_label` are display hints for
    /// presentations that can render custom buttons.
    fn confirm(&self, message: &str, yes_label: &str, no_label: &str) -> Result<bool>;

    /// Pick one option from a list. `None` means the user backed out or the
    /// list was empty.
    fn select(&self, message: &str, options: &[String]) -> Result<Option<usize>>;

    fn notify(&self, message: &str);
}

pub struct ConsolePrompter {
    assume_yes: bool,
}

impl ConsolePrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompter for ConsolePrompter {
    fn confirm(&self, message: &str, yes_label: &str, no_label: &str) -> Result<bool> {
        if self.assume_yes {
            tracing::debug!("--yes: auto-confirming '{}'", message);
            return Ok(true);
        }

        let answer = Confirm::new()
            .with_prompt(format!("{} [{}/{}]", message, yes_label, no_label))
            .default(false)
            .interact()?;
        Ok(answer)
    }

    fn select(&self, message: &str, options: &[String]) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }

        let selection = Select::new()
            .with_prompt(message)
            .items(options)
            .default(0)
            .interact_opt()?;
        Ok(selection)
    }

    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

/// Scripted prompter for tests: answers confirmations from a fixed sequence
/// and records every message it was shown.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::cell::RefCell<Vec<bool>>,
    pub confirmations: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers: std::cell::RefCell::new(answers),
            confirmations: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub fn confirmation_count(&self) -> usize {
        self.confirmations.borrow().len()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str, _yes_label: &str, _no_label: &str) -> Result<bool> {
        self.confirmations.borrow_mut().push(message.to_string());
        let mut answers = self.answers.borrow_mut();
        if answers.is_empty() {
            anyhow::bail!("unexpected confirmation: {}", message);
        }
        Ok(answers.remove(0))
    }

    fn select(&self, _message: &str, options: &[String]) -> Result<Option<usize>> {
        Ok(if options.is_empty() { None } else { Some(0) })
    }

    fn notify(&self, _message: &str) {}
}
