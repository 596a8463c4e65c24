//! GitLab platform service
//!
//! The orchestrators only talk to GitLab through [`PlatformService`], so
//! tests can swap in a recording double.

mod gitlab;

pub use gitlab::GitLabService;

use crate::error::Result;
use crate::types::{
    AcceptOptions, Change, Commit, Issue, Member, MergeRequest, Milestone, NewMergeRequest, Tag,
};
use async_trait::async_trait;

/// Platform service trait for MR operations
///
/// Every call is scoped to the project the service was created for.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get the current snapshot of an MR
    async fn get_mr(&self, mr_iid: u64) -> Result<MergeRequest>;

    /// List the commits of an MR
    async fn get_mr_commits(&self, mr_iid: u64) -> Result<Vec<Commit>>;

    /// List the issues that merging the MR will close
    async fn get_mr_issues(&self, mr_iid: u64) -> Result<Vec<Issue>>;

    /// List the per-file changes of an MR
    async fn get_mr_changes(&self, mr_iid: u64) -> Result<Vec<Change>>;

    /// Open a new MR
    async fn create_mr(&self, mr: &NewMergeRequest) -> Result<MergeRequest>;

    /// Accept (merge) an MR
    ///
    /// Returns the MR as GitLab reports it after the merge.
    async fn accept_mr(&self, mr_iid: u64, options: &AcceptOptions) -> Result<MergeRequest>;

    /// Create a tag pointing at `git_ref`
    async fn create_tag(&self, name: &str, git_ref: &str) -> Result<Tag>;

    /// List project members
    async fn get_project_members(&self) -> Result<Vec<Member>>;

    /// List project milestones, optionally only the active ones
    async fn get_project_milestones(&self, active_only: bool) -> Result<Vec<Milestone>>;

    /// Get a single issue
    async fn get_issue(&self, issue_iid: u64) -> Result<Issue>;
}
