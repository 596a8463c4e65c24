//! Scripted operator for testing

use gitlab_flow::error::{Error, Result};
use gitlab_flow::interact::{Prompter, format_table};
use std::collections::VecDeque;
use std::sync::Mutex;

/// [`Prompter`] that answers from queues and records everything shown
///
/// Unscripted confirmations fall back to their default; unscripted
/// choices pick the first option; unscripted free-text questions fail.
#[derive(Default)]
pub struct ScriptedPrompter {
    confirms: Mutex<VecDeque<bool>>,
    choices: Mutex<VecDeque<usize>>,
    answers: Mutex<VecDeque<String>>,
    questions: Mutex<Vec<String>>,
    output: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue yes/no answers, consumed in order
    pub fn confirm_with(self, answers: &[bool]) -> Self {
        self.confirms.lock().unwrap().extend(answers);
        self
    }

    /// Queue choice indices, consumed in order
    pub fn choose_with(self, picks: &[usize]) -> Self {
        self.choices.lock().unwrap().extend(picks);
        self
    }

    /// Queue free-text answers, consumed in order
    pub fn answer_with(self, answers: &[&str]) -> Self {
        self.answers
            .lock()
            .unwrap()
            .extend(answers.iter().map(ToString::to_string));
        self
    }

    /// Every question asked, in order
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    /// Every non-error line shown, in order
    pub fn output(&self) -> Vec<String> {
        self.output.lock().unwrap().clone()
    }

    /// Every error line shown, in order
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    /// Whether any shown line (output or error) contains `needle`
    pub fn showed(&self, needle: &str) -> bool {
        self.output().iter().chain(self.errors().iter()).any(|l| l.contains(needle))
    }

    /// Whether a question containing `needle` was asked
    pub fn asked(&self, needle: &str) -> bool {
        self.questions().iter().any(|q| q.contains(needle))
    }

    fn show(&self, message: &str) {
        self.output.lock().unwrap().push(message.to_string());
    }
}

impl Prompter for ScriptedPrompter {
    fn line(&self, message: &str) {
        self.show(message);
    }

    fn info(&self, message: &str) {
        self.show(message);
    }

    fn warn(&self, message: &str) {
        self.show(message);
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn ask(&self, question: &str) -> Result<String> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Internal(format!("unscripted question: {question}")))
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(self.confirms.lock().unwrap().pop_front().unwrap_or(default))
    }

    fn choose(&self, question: &str, options: &[String]) -> Result<usize> {
        self.questions.lock().unwrap().push(question.to_string());
        let pick = self.choices.lock().unwrap().pop_front().unwrap_or(0);
        if pick >= options.len() {
            return Err(Error::Internal(format!(
                "choice {pick} out of range for {question}"
            )));
        }
        Ok(pick)
    }

    fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        for line in format_table(headers, rows) {
            self.show(&line);
        }
    }
}
