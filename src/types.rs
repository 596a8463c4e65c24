//! Core types for gitlab-flow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Merge request state as reported by GitLab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MrState {
    /// MR is open and can still be accepted
    Opened,
    /// MR was merged
    Merged,
    /// MR was closed without merging
    Closed,
}

impl MrState {
    /// Map GitLab's state string. Anything that is neither merged nor
    /// closed (e.g. `locked`) is still open from our point of view.
    pub fn from_api(state: &str) -> Self {
        match state {
            "merged" => Self::Merged,
            "closed" => Self::Closed,
            _ => Self::Opened,
        }
    }

    /// Whether the MR can no longer be accepted
    pub const fn is_finalized(self) -> bool {
        matches!(self, Self::Merged | Self::Closed)
    }
}

impl std::fmt::Display for MrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opened => write!(f, "opened"),
            Self::Merged => write!(f, "merged"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// A merge request snapshot, fetched on demand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Project-scoped MR number
    pub iid: u64,
    /// Current state
    pub state: MrState,
    /// Source branch name
    pub source_branch: String,
    /// Target branch name
    pub target_branch: String,
    /// MR title
    pub title: String,
    /// MR description
    pub description: Option<String>,
    /// Assignee display name
    pub assignee: Option<String>,
    /// Milestone title
    pub milestone: Option<String>,
    /// Web URL for the MR
    pub web_url: String,
}

/// A commit belonging to an MR
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// Abbreviated hash
    pub short_id: String,
    /// First line of the message
    pub title: String,
    /// Author name
    pub author_name: String,
    /// When the commit was created
    pub created_at: DateTime<Utc>,
    /// Full commit message
    pub message: String,
}

/// An issue, either closed by an MR or referenced from a branch name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Project-scoped issue number
    pub iid: u64,
    /// Issue title
    pub title: String,
    /// Issue description
    pub description: Option<String>,
    /// Author name
    pub author_name: String,
    /// Assignee name
    pub assignee_name: Option<String>,
    /// When the issue was opened
    pub created_at: DateTime<Utc>,
}

/// One modified file in an MR
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Change {
    /// Path before the change
    pub old_path: String,
    /// Path after the change
    pub new_path: String,
    /// File mode before the change
    pub a_mode: String,
    /// File mode after the change
    pub b_mode: String,
    /// File was added
    pub new_file: bool,
    /// File was renamed
    pub renamed_file: bool,
    /// File was deleted
    pub deleted_file: bool,
    /// Unified diff text
    pub diff: String,
}

/// A project member that can be assigned to an MR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// User id
    pub id: u64,
    /// Login name
    pub username: String,
    /// Display name
    pub name: String,
}

/// A project milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Global milestone id
    pub id: u64,
    /// Milestone title
    pub title: String,
}

/// A created tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,
    /// Commit the tag points to
    pub target: String,
}

/// Payload for opening a new MR
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewMergeRequest {
    /// Source branch name
    pub source_branch: String,
    /// Target branch name
    pub target_branch: String,
    /// MR title
    pub title: String,
    /// MR description
    pub description: Option<String>,
    /// Assignee user id
    pub assignee_id: Option<u64>,
    /// Milestone id
    pub milestone_id: Option<u64>,
}

/// Options for accepting an MR
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AcceptOptions {
    /// Custom merge commit message
    pub message: Option<String>,
    /// Remove the source branch once merged
    pub remove_source_branch: bool,
}

/// Output of a local git command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit status (0 = success)
    pub status: i32,
    /// Combined output, one entry per line
    pub lines: Vec<String>,
}

impl CommandOutput {
    /// Whether the command exited with status 0
    pub const fn success(&self) -> bool {
        self.status == 0
    }
}
