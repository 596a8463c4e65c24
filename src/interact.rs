//! Operator interaction
//!
//! The orchestrators decide *what* to show and ask; a [`Prompter`] decides
//! *how*. The binary drives a terminal, tests drive a scripted double.

use crate::error::Result;

/// Capability to talk to the operator
///
/// Questions block until answered; there is no timeout.
pub trait Prompter: Send + Sync {
    /// Plain output line
    fn line(&self, message: &str);

    /// Informational (success-coloured) line
    fn info(&self, message: &str);

    /// Warning line
    fn warn(&self, message: &str);

    /// Error line
    fn error(&self, message: &str);

    /// Ask a free-text question
    fn ask(&self, question: &str) -> Result<String>;

    /// Ask a yes/no question
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Offer a single choice, returning the index of the picked option
    fn choose(&self, question: &str, options: &[String]) -> Result<usize>;

    /// Render tabular data
    fn table(&self, headers: &[&str], rows: &[Vec<String>]);

    /// Signal that a slow call is in flight
    fn start_progress(&self, message: &str) {
        self.info(message);
    }

    /// Signal that the slow call finished
    fn finish_progress(&self) {}
}

/// Lay out a bordered text table
///
/// Cells containing line breaks are flattened to a single line so the
/// borders stay aligned.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let flatten = |cell: &str| cell.split_whitespace().collect::<Vec<_>>().join(" ");

    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| flatten(c)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let format_row = |cells: &[String]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let cell = cells.get(i).map_or("", String::as_str);
                format!(" {cell:<w$} ")
            })
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let header_cells: Vec<String> = headers.iter().map(ToString::to_string).collect();
    let mut lines = vec![border.clone(), format_row(&header_cells), border.clone()];
    lines.extend(rows.iter().map(|r| format_row(r)));
    lines.push(border);
    lines
}
