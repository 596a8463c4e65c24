//! Mock GitLab service for testing

use async_trait::async_trait;
use gitlab_flow::error::{Error, Result};
use gitlab_flow::platform::PlatformService;
use gitlab_flow::types::{
    AcceptOptions, Change, Commit, Issue, Member, MergeRequest, Milestone, MrState,
    NewMergeRequest, Tag,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `accept_mr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptCall {
    pub mr_iid: u64,
    pub options: AcceptOptions,
}

/// Call record for `create_tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCall {
    pub name: String,
    pub git_ref: String,
}

/// Hand-written [`PlatformService`] double
///
/// Features:
/// - Queued `get_mr` snapshots, so a test can script "opened, then merged"
/// - Auto-incrementing iids for created MRs
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    next_iid: AtomicU64,
    mr_snapshots: Mutex<VecDeque<MergeRequest>>,
    last_snapshot: Mutex<Option<MergeRequest>>,
    commits: Mutex<Vec<Commit>>,
    issues: Mutex<Vec<Issue>>,
    changes: Mutex<Vec<Change>>,
    members: Mutex<Vec<Member>>,
    milestones: Mutex<Vec<Milestone>>,
    project_issues: Mutex<HashMap<u64, Issue>>,
    // Call tracking
    get_mr_calls: Mutex<Vec<u64>>,
    create_mr_calls: Mutex<Vec<NewMergeRequest>>,
    accept_calls: Mutex<Vec<AcceptCall>>,
    tag_calls: Mutex<Vec<TagCall>>,
    get_issue_calls: Mutex<Vec<u64>>,
    milestone_calls: Mutex<Vec<bool>>,
    review_calls: Mutex<Vec<&'static str>>,
    // Error injection
    error_on_accept: Mutex<Option<Error>>,
    error_on_create: Mutex<Option<Error>>,
    error_on_tag: Mutex<Option<Error>>,
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatformService {
    pub fn new() -> Self {
        Self {
            next_iid: AtomicU64::new(1),
            mr_snapshots: Mutex::new(VecDeque::new()),
            last_snapshot: Mutex::new(None),
            commits: Mutex::new(Vec::new()),
            issues: Mutex::new(Vec::new()),
            changes: Mutex::new(Vec::new()),
            members: Mutex::new(Vec::new()),
            milestones: Mutex::new(Vec::new()),
            project_issues: Mutex::new(HashMap::new()),
            get_mr_calls: Mutex::new(Vec::new()),
            create_mr_calls: Mutex::new(Vec::new()),
            accept_calls: Mutex::new(Vec::new()),
            tag_calls: Mutex::new(Vec::new()),
            get_issue_calls: Mutex::new(Vec::new()),
            milestone_calls: Mutex::new(Vec::new()),
            review_calls: Mutex::new(Vec::new()),
            error_on_accept: Mutex::new(None),
            error_on_create: Mutex::new(None),
            error_on_tag: Mutex::new(None),
        }
    }

    /// Start numbering created MRs at `iid`
    pub fn with_next_iid(self, iid: u64) -> Self {
        self.next_iid.store(iid, Ordering::SeqCst);
        self
    }

    // === Response setup ===

    /// Queue a `get_mr` snapshot; the last one keeps being returned
    pub fn push_mr_snapshot(&self, mr: MergeRequest) {
        self.mr_snapshots.lock().unwrap().push_back(mr);
    }

    pub fn set_commits(&self, commits: Vec<Commit>) {
        *self.commits.lock().unwrap() = commits;
    }

    pub fn set_mr_issues(&self, issues: Vec<Issue>) {
        *self.issues.lock().unwrap() = issues;
    }

    pub fn set_changes(&self, changes: Vec<Change>) {
        *self.changes.lock().unwrap() = changes;
    }

    pub fn set_members(&self, members: Vec<Member>) {
        *self.members.lock().unwrap() = members;
    }

    pub fn set_milestones(&self, milestones: Vec<Milestone>) {
        *self.milestones.lock().unwrap() = milestones;
    }

    pub fn add_issue(&self, issue: Issue) {
        self.project_issues.lock().unwrap().insert(issue.iid, issue);
    }

    // === Error injection ===

    /// Make `accept_mr` fail with `error`
    pub fn fail_accept(&self, error: Error) {
        *self.error_on_accept.lock().unwrap() = Some(error);
    }

    /// Make `create_mr` fail with `error`
    pub fn fail_create(&self, error: Error) {
        *self.error_on_create.lock().unwrap() = Some(error);
    }

    /// Make `create_tag` fail with `error`
    pub fn fail_tag(&self, error: Error) {
        *self.error_on_tag.lock().unwrap() = Some(error);
    }

    // === Call inspection ===

    pub fn get_mr_calls(&self) -> Vec<u64> {
        self.get_mr_calls.lock().unwrap().clone()
    }

    pub fn create_mr_calls(&self) -> Vec<NewMergeRequest> {
        self.create_mr_calls.lock().unwrap().clone()
    }

    pub fn accept_calls(&self) -> Vec<AcceptCall> {
        self.accept_calls.lock().unwrap().clone()
    }

    pub fn tag_calls(&self) -> Vec<TagCall> {
        self.tag_calls.lock().unwrap().clone()
    }

    pub fn get_issue_calls(&self) -> Vec<u64> {
        self.get_issue_calls.lock().unwrap().clone()
    }

    pub fn milestone_calls(&self) -> Vec<bool> {
        self.milestone_calls.lock().unwrap().clone()
    }

    /// Names of the review listings fetched, in order
    pub fn review_calls(&self) -> Vec<&'static str> {
        self.review_calls.lock().unwrap().clone()
    }

    fn snapshot(&self, mr_iid: u64) -> Result<MergeRequest> {
        let mut last = self.last_snapshot.lock().unwrap();
        if let Some(next) = self.mr_snapshots.lock().unwrap().pop_front() {
            *last = Some(next);
        }
        last.clone()
            .ok_or_else(|| Error::GitLabApi(format!("404 MR !{mr_iid} not found")))
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_mr(&self, mr_iid: u64) -> Result<MergeRequest> {
        self.get_mr_calls.lock().unwrap().push(mr_iid);
        self.snapshot(mr_iid)
    }

    async fn get_mr_commits(&self, _mr_iid: u64) -> Result<Vec<Commit>> {
        self.review_calls.lock().unwrap().push("commits");
        Ok(self.commits.lock().unwrap().clone())
    }

    async fn get_mr_issues(&self, _mr_iid: u64) -> Result<Vec<Issue>> {
        self.review_calls.lock().unwrap().push("issues");
        Ok(self.issues.lock().unwrap().clone())
    }

    async fn get_mr_changes(&self, _mr_iid: u64) -> Result<Vec<Change>> {
        self.review_calls.lock().unwrap().push("changes");
        Ok(self.changes.lock().unwrap().clone())
    }

    async fn create_mr(&self, mr: &NewMergeRequest) -> Result<MergeRequest> {
        self.create_mr_calls.lock().unwrap().push(mr.clone());
        if let Some(error) = self.error_on_create.lock().unwrap().take() {
            return Err(error);
        }

        let iid = self.next_iid.fetch_add(1, Ordering::SeqCst);
        let mut created = super::make_mr(iid, MrState::Opened, &mr.source_branch, &mr.target_branch);
        created.title.clone_from(&mr.title);
        created.description.clone_from(&mr.description);
        // The created MR is what later lookups see unless a test queued more
        *self.last_snapshot.lock().unwrap() = Some(created.clone());
        Ok(created)
    }

    async fn accept_mr(&self, mr_iid: u64, options: &AcceptOptions) -> Result<MergeRequest> {
        self.accept_calls.lock().unwrap().push(AcceptCall {
            mr_iid,
            options: options.clone(),
        });
        if let Some(error) = self.error_on_accept.lock().unwrap().take() {
            return Err(error);
        }

        let mut merged = self.snapshot(mr_iid)?;
        merged.state = MrState::Merged;
        *self.last_snapshot.lock().unwrap() = Some(merged.clone());
        Ok(merged)
    }

    async fn create_tag(&self, name: &str, git_ref: &str) -> Result<Tag> {
        self.tag_calls.lock().unwrap().push(TagCall {
            name: name.to_string(),
            git_ref: git_ref.to_string(),
        });
        if let Some(error) = self.error_on_tag.lock().unwrap().take() {
            return Err(error);
        }
        Ok(Tag {
            name: name.to_string(),
            target: "abc1234".to_string(),
        })
    }

    async fn get_project_members(&self) -> Result<Vec<Member>> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn get_project_milestones(&self, active_only: bool) -> Result<Vec<Milestone>> {
        self.milestone_calls.lock().unwrap().push(active_only);
        Ok(self.milestones.lock().unwrap().clone())
    }

    async fn get_issue(&self, issue_iid: u64) -> Result<Issue> {
        self.get_issue_calls.lock().unwrap().push(issue_iid);
        self.project_issues
            .lock()
            .unwrap()
            .get(&issue_iid)
            .cloned()
            .ok_or_else(|| Error::GitLabApi(format!("404 issue #{issue_iid} not found")))
    }
}
