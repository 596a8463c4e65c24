//! Terminal styling helpers
//!
//! Colours are only emitted when the stream written to supports them.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};
use std::fmt::Display;

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Colour roles used across the CLI
pub trait Stylize: Display {
    /// De-emphasised text
    fn muted(&self) -> String {
        self.if_supports_color(Stdout, |t| t.dimmed()).to_string()
    }

    /// Bold text
    fn emphasis(&self) -> String {
        self.if_supports_color(Stdout, |t| t.bold()).to_string()
    }

    /// Highlighted names and numbers
    fn accent(&self) -> String {
        self.if_supports_color(Stdout, |t| t.cyan()).to_string()
    }

    /// Success / informational text
    fn success(&self) -> String {
        self.if_supports_color(Stdout, |t| t.green()).to_string()
    }

    /// Warnings
    fn warn(&self) -> String {
        self.if_supports_color(Stdout, |t| t.yellow()).to_string()
    }

    /// Errors
    fn error(&self) -> String {
        self.if_supports_color(Stdout, |t| t.red()).to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Red "Error:" label for messages written to stderr
pub fn error_label() -> String {
    "Error:".if_supports_color(Stderr, |t| t.red()).to_string()
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Render `url` as a terminal hyperlink when supported
pub fn hyperlink(text: &str, url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(text, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner style for slow GitLab calls
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
}
