//! Mock git executor for testing

use async_trait::async_trait;
use gitlab_flow::error::Result;
use gitlab_flow::types::CommandOutput;
use gitlab_flow::vcs::Vcs;
use std::sync::Mutex;

/// One git invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    CurrentBranch,
    Push(String),
    Checkout(String),
    Pull(String),
}

/// Scripted [`Vcs`] double; every command succeeds unless told otherwise
pub struct MockVcs {
    branch: String,
    push_status: Mutex<i32>,
    checkout_status: Mutex<i32>,
    pull_status: Mutex<i32>,
    calls: Mutex<Vec<VcsCall>>,
}

impl MockVcs {
    /// Working copy with `branch` checked out
    pub fn on_branch(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            push_status: Mutex::new(0),
            checkout_status: Mutex::new(0),
            pull_status: Mutex::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_push_status(&self, status: i32) {
        *self.push_status.lock().unwrap() = status;
    }

    pub fn set_checkout_status(&self, status: i32) {
        *self.checkout_status.lock().unwrap() = status;
    }

    pub fn set_pull_status(&self, status: i32) {
        *self.pull_status.lock().unwrap() = status;
    }

    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: VcsCall, status: &Mutex<i32>, line: String) -> CommandOutput {
        self.calls.lock().unwrap().push(call);
        CommandOutput {
            status: *status.lock().unwrap(),
            lines: vec![line],
        }
    }
}

#[async_trait]
impl Vcs for MockVcs {
    async fn current_branch(&self) -> Result<String> {
        self.calls.lock().unwrap().push(VcsCall::CurrentBranch);
        Ok(self.branch.clone())
    }

    async fn push(&self, branch: &str) -> Result<CommandOutput> {
        Ok(self.record(
            VcsCall::Push(branch.to_string()),
            &self.push_status,
            format!("To origin\n   {branch} -> {branch}"),
        ))
    }

    async fn checkout(&self, branch: &str) -> Result<CommandOutput> {
        Ok(self.record(
            VcsCall::Checkout(branch.to_string()),
            &self.checkout_status,
            format!("Switched to branch '{branch}'"),
        ))
    }

    async fn pull(&self, branch: &str) -> Result<CommandOutput> {
        Ok(self.record(
            VcsCall::Pull(branch.to_string()),
            &self.pull_status,
            format!("From origin * branch {branch}"),
        ))
    }
}
