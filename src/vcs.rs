//! Local git commands
//!
//! Only the handful of shell-outs the MR flows need: current branch, push,
//! checkout and pull. Non-zero exits are not errors here; callers decide
//! what a failed push or pull means for their flow.

use crate::error::{Error, Result};
use crate::types::CommandOutput;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Remote every push and pull goes to
pub const DEFAULT_REMOTE: &str = "origin";

/// Version control executor
#[async_trait]
pub trait Vcs: Send + Sync {
    /// Name of the currently checked out branch
    async fn current_branch(&self) -> Result<String>;

    /// Push `branch` to the remote
    async fn push(&self, branch: &str) -> Result<CommandOutput>;

    /// Check out `branch` locally
    async fn checkout(&self, branch: &str) -> Result<CommandOutput>;

    /// Pull `branch` from the remote
    async fn pull(&self, branch: &str) -> Result<CommandOutput>;
}

/// [`Vcs`] backed by the `git` binary
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    remote: String,
}

impl GitCli {
    /// Run git in `workdir` against the default remote
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|e| Error::Vcs(format!("failed to run git {}: {e}", args.join(" "))))?;

        // git reports progress on stderr, so both streams are surfaced
        let lines = String::from_utf8_lossy(&output.stdout)
            .lines()
            .chain(String::from_utf8_lossy(&output.stderr).lines())
            .map(str::to_string)
            .collect();

        // Killed by a signal: no exit code, still a failure
        let status = output.status.code().unwrap_or(-1);
        debug!(?args, status, "git finished");
        Ok(CommandOutput { status, lines })
    }
}

#[async_trait]
impl Vcs for GitCli {
    async fn current_branch(&self) -> Result<String> {
        let output = self.run(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        if !output.success() {
            return Err(Error::Vcs(format!(
                "cannot determine current branch: {}",
                output.lines.join(" ")
            )));
        }
        output
            .lines
            .first()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::Vcs("cannot determine current branch".to_string()))
    }

    async fn push(&self, branch: &str) -> Result<CommandOutput> {
        self.run(&["push", &self.remote, branch, "--progress"]).await
    }

    async fn checkout(&self, branch: &str) -> Result<CommandOutput> {
        self.run(&["checkout", branch]).await
    }

    async fn pull(&self, branch: &str) -> Result<CommandOutput> {
        self.run(&["pull", &self.remote, branch]).await
    }
}
