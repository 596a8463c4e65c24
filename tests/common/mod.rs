//! Shared test utilities

#![allow(dead_code)]

mod mock_platform;
mod mock_vcs;
mod scripted_prompter;

pub use mock_platform::{AcceptCall, MockPlatformService, TagCall};
pub use mock_vcs::{MockVcs, VcsCall};
pub use scripted_prompter::ScriptedPrompter;

use chrono::{TimeZone, Utc};
use gitlab_flow::mr::Collaborators;
use gitlab_flow::types::{Change, Commit, Issue, Member, MergeRequest, Milestone, MrState};

/// Build an MR snapshot
pub fn make_mr(iid: u64, state: MrState, source: &str, target: &str) -> MergeRequest {
    MergeRequest {
        iid,
        state,
        source_branch: source.to_string(),
        target_branch: target.to_string(),
        title: format!("MR {iid}"),
        description: None,
        assignee: None,
        milestone: None,
        web_url: format!("https://gitlab.example.com/group/app/-/merge_requests/{iid}"),
    }
}

/// Build an issue
pub fn make_issue(iid: u64, title: &str) -> Issue {
    Issue {
        iid,
        title: title.to_string(),
        description: Some(format!("Description of {title}")),
        author_name: "Ada".to_string(),
        assignee_name: None,
        created_at: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
    }
}

/// Build a commit
pub fn make_commit(short_id: &str, title: &str) -> Commit {
    Commit {
        short_id: short_id.to_string(),
        title: title.to_string(),
        author_name: "Ada".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 6, 9, 30, 0).unwrap(),
        message: format!("{title}\n\nLonger body"),
    }
}

/// Build a change for `path` with the given diff
pub fn make_change(path: &str, diff: &str) -> Change {
    Change {
        old_path: path.to_string(),
        new_path: path.to_string(),
        a_mode: "100644".to_string(),
        b_mode: "100644".to_string(),
        new_file: false,
        renamed_file: false,
        deleted_file: false,
        diff: diff.to_string(),
    }
}

/// Build a project member
pub fn make_member(id: u64, name: &str) -> Member {
    Member {
        id,
        username: name.to_lowercase(),
        name: name.to_string(),
    }
}

/// Build a milestone
pub fn make_milestone(id: u64, title: &str) -> Milestone {
    Milestone {
        id,
        title: title.to_string(),
    }
}

/// Bundle the doubles into collaborators
pub fn collaborators<'a>(
    platform: &'a MockPlatformService,
    vcs: &'a MockVcs,
    prompter: &'a ScriptedPrompter,
) -> Collaborators<'a> {
    Collaborators {
        platform,
        vcs,
        prompter,
    }
}
