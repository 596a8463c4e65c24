//! Pushing the working branch before MR operations

use crate::error::Result;
use crate::mr::Collaborators;
use crate::vcs::DEFAULT_REMOTE;

/// What happened when pushing a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushDecision {
    /// Push succeeded
    Pushed,
    /// Push failed and the operator chose to continue anyway
    ContinuedAfterFailure,
    /// Push failed and the operator cancelled the command
    Cancelled,
}

impl PushDecision {
    /// Whether the calling flow may proceed
    pub const fn proceed(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Push `branch`, asking whether to carry on if git fails
pub async fn push_branch(collab: Collaborators<'_>, branch: &str) -> Result<PushDecision> {
    let prompter = collab.prompter;
    prompter.info(&format!("Pushing {branch} to {DEFAULT_REMOTE} ... wait ..."));

    let output = collab.vcs.push(branch).await?;
    for line in &output.lines {
        prompter.line(line);
    }

    if output.success() {
        return Ok(PushDecision::Pushed);
    }

    prompter.error(&format!("Push err {}", output.status));
    if prompter.confirm("Continue?", false)? {
        Ok(PushDecision::ContinuedAfterFailure)
    } else {
        prompter.warn("Command cancelled!");
        Ok(PushDecision::Cancelled)
    }
}
