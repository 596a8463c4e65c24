//! Terminal-backed [`Prompter`]

use crate::cli::style::{Stylize, spinner_style};
use anstream::println;
use dialoguer::{Confirm, Input, Select};
use gitlab_flow::error::{Error, Result};
use gitlab_flow::interact::{Prompter, format_table};
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;

/// Prompts through dialoguer, prints through anstream
#[derive(Default)]
pub struct TerminalPrompter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalPrompter {
    /// Create a prompter for the current terminal
    pub fn new() -> Self {
        Self::default()
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Internal(format!("failed to read answer: {e}"))
}

impl Prompter for TerminalPrompter {
    fn line(&self, message: &str) {
        println!("{message}");
    }

    fn info(&self, message: &str) {
        println!("{}", message.success());
    }

    fn warn(&self, message: &str) {
        println!("{}", message.warn());
    }

    fn error(&self, message: &str) {
        println!("{}", message.error());
    }

    fn ask(&self, question: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn choose(&self, question: &str, options: &[String]) -> Result<usize> {
        Select::new()
            .with_prompt(question)
            .items(options)
            .default(0)
            .interact()
            .map_err(prompt_error)
    }

    fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        for line in format_table(headers, rows) {
            println!("{line}");
        }
    }

    fn start_progress(&self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    fn finish_progress(&self) {
        if let Some(spinner) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) {
            spinner.finish_and_clear();
        }
    }
}
