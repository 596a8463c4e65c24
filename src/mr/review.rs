//! Review listings shown before accepting an MR

use crate::error::Result;
use crate::mr::Collaborators;
use crate::types::{Change, Commit, Issue};
use chrono::{DateTime, Utc};

/// Column headers of the issue table
pub const ISSUE_HEADERS: [&str; 5] = ["id", "Title", "Author", "Assignee", "Created"];

/// Column headers of the commit table
pub const COMMIT_HEADERS: [&str; 5] = ["Hash", "Title", "Author", "Created", "Message"];

/// Column headers of the per-file change table
pub const CHANGE_HEADERS: [&str; 5] = ["Path", "Mode", "New file", "Renamed file", "Deleted file"];

/// How a unified diff line is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    /// `@@ ... @@` hunk header
    Hunk,
    /// Removed line
    Removed,
    /// Added line
    Added,
}

/// Classify a diff line by its first character; context lines are hidden
pub fn classify_diff_line(line: &str) -> Option<DiffLineKind> {
    match line.chars().next()? {
        '@' => Some(DiffLineKind::Hunk),
        '-' => Some(DiffLineKind::Removed),
        '+' => Some(DiffLineKind::Added),
        _ => None,
    }
}

fn transition(before: &str, after: &str) -> String {
    if before == after {
        before.to_string()
    } else {
        format!("{before} => {after}")
    }
}

fn mark(flag: bool) -> String {
    if flag { "x".to_string() } else { String::new() }
}

/// Table row for one changed file
///
/// Path and mode only show ` => new` when they actually changed.
pub fn change_row(change: &Change) -> Vec<String> {
    vec![
        transition(&change.old_path, &change.new_path),
        transition(&change.a_mode, &change.b_mode),
        mark(change.new_file),
        mark(change.renamed_file),
        mark(change.deleted_file),
    ]
}

fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

fn issue_row(issue: &Issue) -> Vec<String> {
    vec![
        issue.iid.to_string(),
        issue.title.clone(),
        issue.author_name.clone(),
        issue.assignee_name.clone().unwrap_or_default(),
        format_date(&issue.created_at),
    ]
}

fn commit_row(commit: &Commit) -> Vec<String> {
    vec![
        commit.short_id.clone(),
        commit.title.clone(),
        commit.author_name.clone(),
        format_date(&commit.created_at),
        commit.message.clone(),
    ]
}

/// Show the issues merging the MR will close
pub async fn list_issues(collab: Collaborators<'_>, mr_iid: u64) -> Result<()> {
    let prompter = collab.prompter;
    prompter.info("Loading issues that will be closed in this MR ...");
    let issues = collab.platform.get_mr_issues(mr_iid).await?;

    prompter.warn("ISSUES to be closed");
    if issues.is_empty() {
        prompter.warn(" - No issues will be closed in this MR");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = issues.iter().map(issue_row).collect();
    prompter.table(&ISSUE_HEADERS, &rows);
    Ok(())
}

/// Show the commits of the MR
pub async fn list_commits(collab: Collaborators<'_>, mr_iid: u64) -> Result<()> {
    let prompter = collab.prompter;
    prompter.info("Loading commits for this MR ...");
    let commits = collab.platform.get_mr_commits(mr_iid).await?;

    prompter.warn("Commits in this MR");
    if commits.is_empty() {
        prompter.warn(" - No commits in this MR");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = commits.iter().map(commit_row).collect();
    prompter.table(&COMMIT_HEADERS, &rows);
    Ok(())
}

/// Walk the MR's changes file by file, pausing between files
pub async fn list_changes(collab: Collaborators<'_>, mr_iid: u64) -> Result<()> {
    let prompter = collab.prompter;
    prompter.info("Loading changes in this MR ...");
    let changes = collab.platform.get_mr_changes(mr_iid).await?;

    prompter.warn("Changes in this MR");
    if changes.is_empty() {
        prompter.warn(" - No changes in this MR");
        return Ok(());
    }

    for change in &changes {
        prompter.table(&CHANGE_HEADERS, &[change_row(change)]);

        for line in change.diff.lines() {
            match classify_diff_line(line) {
                Some(DiffLineKind::Hunk) => prompter.line(line),
                Some(DiffLineKind::Removed) => prompter.warn(line),
                Some(DiffLineKind::Added) => prompter.info(line),
                None => {}
            }
        }

        if !prompter.confirm("Show next change?", true)? {
            break;
        }
    }

    prompter.info("End of changes.");
    Ok(())
}
