//! Merge request lifecycle
//!
//! Two entry points, both driven by injected collaborators:
//! - [`create_mr`] - push, derive title/description, pick assignee and
//!   milestone, open the MR and optionally merge it right away
//! - [`merge_mr`] - check state, review, accept, recover from ambiguous
//!   timeouts and run post-merge actions
//!
//! Outcomes are returned as values; declined confirmations and remote
//! failures are reported to the operator and never bubble up as errors.

mod branch;
mod create;
mod merge;
mod post_merge;
mod push;
mod review;

pub use branch::{WIP_PREFIX, default_description, default_title, issue_ref, with_wip};
pub use create::create_mr;
pub use merge::merge_mr;
pub use post_merge::{MergedMr, run_post_merge};
pub use push::{PushDecision, push_branch};
pub use review::{
    CHANGE_HEADERS, COMMIT_HEADERS, DiffLineKind, ISSUE_HEADERS, change_row, classify_diff_line,
};

use crate::error::Error;
use crate::interact::Prompter;
use crate::platform::PlatformService;
use crate::vcs::Vcs;

/// Injected collaborators shared by every orchestration
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// GitLab API
    pub platform: &'a dyn PlatformService,
    /// Local git
    pub vcs: &'a dyn Vcs,
    /// Operator interaction
    pub prompter: &'a dyn Prompter,
}

/// Options for opening an MR
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct CreateOptions {
    /// Source branch; defaults to the current branch
    pub source: Option<String>,
    /// Target branch; defaults to the configured default
    pub target: Option<String>,
    /// Explicit MR title
    pub title: Option<String>,
    /// Explicit MR description
    pub description: Option<String>,
    /// Don't ask for an assignee
    pub no_assignee: bool,
    /// Don't ask for a milestone
    pub no_milestone: bool,
    /// Mark the MR as work in progress
    pub wip: bool,
    /// Don't push the source branch first
    pub no_push: bool,
    /// Merge the MR right after creating it
    pub merge: bool,
    /// Forwarded to the merge: remove the source branch
    pub remove_source: bool,
    /// Forwarded to the merge: check out and pull the target afterwards
    pub update_local: bool,
    /// Forwarded to the merge: tag the target branch afterwards
    pub tag_after: Option<String>,
}

/// Options for accepting an MR
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MergeOptions {
    /// MR to accept
    pub mr_iid: u64,
    /// Custom merge commit message
    pub message: Option<String>,
    /// Remove the source branch once merged
    pub remove_source: bool,
    /// Push the current branch before merging
    pub push: bool,
    /// Check out and pull the target branch after merging
    pub update_local: bool,
    /// Tag the target branch after merging
    pub tag_after: Option<String>,
    /// Skip review listings and confirmation
    pub yes: bool,
}

impl MergeOptions {
    /// The subset of options the post-merge runner needs
    pub fn post_merge(&self) -> PostMergeOptions {
        PostMergeOptions {
            update_local: self.update_local,
            tag_after: self.tag_after.clone(),
        }
    }
}

/// Actions to run once an MR is merged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostMergeOptions {
    /// Check out and pull the target branch
    pub update_local: bool,
    /// Tag the target branch with this name
    pub tag_after: Option<String>,
}

impl PostMergeOptions {
    /// Whether any post-merge action was asked for
    pub const fn is_requested(&self) -> bool {
        self.update_local || self.tag_after.is_some()
    }
}

/// How post-merge actions ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostMergeOutcome {
    /// Neither update nor tag was requested
    NotRequested,
    /// Target branch synced, and tagged if requested
    Completed {
        /// Branch that was checked out and pulled
        target_branch: String,
        /// Tag created on the target branch
        tag: Option<String>,
    },
    /// `git checkout` exited non-zero
    CheckoutFailed(i32),
    /// `git pull` exited non-zero
    PullFailed(i32),
    /// A GitLab call (MR lookup or tag creation) failed
    Failed(String),
}

/// How a merge attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The MR is merged
    Accepted {
        /// Merged MR
        mr_iid: u64,
        /// Merge was confirmed by re-checking state after a timeout
        recovered: bool,
        /// What the post-merge runner did
        post_merge: PostMergeOutcome,
    },
    /// Operator declined; nothing was changed remotely
    StillOpen,
    /// Validation failed before any remote mutation
    Aborted(String),
    /// The accept call failed; the MR is still open
    Failed(String),
}

impl MergeOutcome {
    /// Whether the MR ended up merged
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// How an MR creation attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// MR opened (and merged, if asked)
    Created {
        /// Iid of the new MR
        mr_iid: u64,
        /// Web URL of the new MR
        web_url: String,
        /// Result of the chained merge, if `merge` was set
        merge: Option<MergeOutcome>,
    },
    /// Operator stopped the flow; no MR was created
    Aborted(String),
    /// A remote call failed
    Failed(String),
}

/// Surface a gateway error the way both orchestrators do
///
/// HTTP errors get their status, reason and body summary on separate
/// lines; everything else is shown as its message.
pub(crate) fn report_error(prompter: &dyn Prompter, error: &Error) -> String {
    if let Error::Http { body, .. } = error {
        prompter.line("");
        prompter.error(&format!("  {error}"));
        if !body.is_empty() {
            prompter.error(&format!("  {body}"));
        }
        prompter.line("");
    } else {
        prompter.error(&error.to_string());
    }
    error.to_string()
}
