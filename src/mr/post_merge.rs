//! Post-merge actions: sync the local target branch and tag it
//!
//! Failures here never undo the merge; they stop the remaining actions
//! and are reported in the returned [`PostMergeOutcome`].

use crate::mr::{Collaborators, PostMergeOptions, PostMergeOutcome, report_error};
use crate::types::{CommandOutput, MergeRequest};
use tracing::debug;

/// What is known about the MR that was just merged
#[derive(Debug, Clone)]
pub enum MergedMr {
    /// Full record returned by the accept call
    Record(MergeRequest),
    /// Only the iid (merge confirmed by re-checking state)
    Iid(u64),
}

fn show_output(collab: Collaborators<'_>, output: &CommandOutput) {
    for line in &output.lines {
        collab.prompter.line(line);
    }
}

/// Run the requested post-merge actions
///
/// Checks out and pulls the target branch, then tags it via GitLab when
/// `tag_after` is set. Tagging implies the local sync.
pub async fn run_post_merge(
    collab: Collaborators<'_>,
    merged: MergedMr,
    options: &PostMergeOptions,
) -> PostMergeOutcome {
    if !options.is_requested() {
        return PostMergeOutcome::NotRequested;
    }
    let prompter = collab.prompter;

    let mr = match merged {
        MergedMr::Record(mr) => mr,
        MergedMr::Iid(mr_iid) => match collab.platform.get_mr(mr_iid).await {
            Ok(mr) => mr,
            Err(e) => return PostMergeOutcome::Failed(report_error(prompter, &e)),
        },
    };
    let target = mr.target_branch;
    debug!(mr_iid = mr.iid, %target, "running post-merge actions");

    prompter.line(&format!("Checkout branch {target}"));
    let checkout = match collab.vcs.checkout(&target).await {
        Ok(output) => output,
        Err(e) => return PostMergeOutcome::Failed(report_error(prompter, &e)),
    };
    show_output(collab, &checkout);
    if !checkout.success() {
        prompter.error(&format!("Checkout err {}", checkout.status));
        return PostMergeOutcome::CheckoutFailed(checkout.status);
    }

    prompter.line(&format!("Pull branch {target}"));
    let pull = match collab.vcs.pull(&target).await {
        Ok(output) => output,
        Err(e) => return PostMergeOutcome::Failed(report_error(prompter, &e)),
    };
    show_output(collab, &pull);
    if !pull.success() {
        prompter.error(&format!("Pull err {}", pull.status));
        return PostMergeOutcome::PullFailed(pull.status);
    }

    let Some(tag) = options.tag_after.as_deref() else {
        return PostMergeOutcome::Completed {
            target_branch: target,
            tag: None,
        };
    };

    prompter.info("Tagging");
    if let Err(e) = collab.platform.create_tag(tag, &target).await {
        return PostMergeOutcome::Failed(report_error(prompter, &e));
    }
    prompter.info(&format!("Branch {target} tagged with name {tag}"));

    PostMergeOutcome::Completed {
        target_branch: target,
        tag: Some(tag.to_string()),
    }
}
