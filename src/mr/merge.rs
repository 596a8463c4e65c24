//! MR acceptance
//!
//! State machine:
//!
//! ```text
//! Open ─┬─ finalized already ───────────────────────────▶ Aborted
//!       ├─ review (unless --yes) ─ declined ────────────▶ StillOpen
//!       └─ accept ─┬─ ok ───────────────────────────────▶ Accepted
//!                  ├─ HTTP error ───────────────────────▶ Failed
//!                  ├─ not responding ─┬─ now merged ────▶ Accepted (recovered)
//!                  │                  └─ still open ────▶ Failed
//!                  └─ other error ──────────────────────▶ Failed
//! ```
//!
//! A timed-out accept is never re-issued: GitLab may already have merged,
//! and a second call would fail with a confusing "already merged" error.
//! The MR state is queried instead.

use crate::error::Error;
use crate::mr::post_merge::{MergedMr, run_post_merge};
use crate::mr::push::push_branch;
use crate::mr::review::{list_changes, list_commits, list_issues};
use crate::mr::{Collaborators, MergeOptions, MergeOutcome, report_error};
use crate::types::AcceptOptions;
use tracing::{debug, warn};

const STILL_OPEN: &str = "MR still opened";

fn failed(collab: Collaborators<'_>, error: &Error) -> MergeOutcome {
    let reason = report_error(collab.prompter, error);
    collab.prompter.warn(STILL_OPEN);
    MergeOutcome::Failed(reason)
}

/// Accept an MR and run the requested post-merge actions
pub async fn merge_mr(collab: Collaborators<'_>, options: &MergeOptions) -> MergeOutcome {
    let prompter = collab.prompter;
    let mr_iid = options.mr_iid;
    debug!(mr_iid, yes = options.yes, "merging MR");

    if options.push {
        let pushed = match collab.vcs.current_branch().await {
            Ok(branch) => push_branch(collab, &branch).await,
            Err(e) => Err(e),
        };
        match pushed {
            Ok(decision) if decision.proceed() => {}
            Ok(_) => return MergeOutcome::Aborted("push failed, merge cancelled".to_string()),
            Err(e) => return failed(collab, &e),
        }
    }

    prompter.info("Checking MR state ...");
    let current = match collab.platform.get_mr(mr_iid).await {
        Ok(mr) => mr,
        Err(e) => return failed(collab, &e),
    };
    if current.state.is_finalized() {
        let reason = format!("Can't accept, MR !{mr_iid} is {} already !!", current.state);
        prompter.error(&reason);
        return MergeOutcome::Aborted(reason);
    }

    if !options.yes {
        if let Err(e) = review(collab, mr_iid).await {
            return failed(collab, &e);
        }

        match prompter.confirm("Accept and merge this MR?", true) {
            Ok(true) => {}
            Ok(false) => {
                prompter.warn(STILL_OPEN);
                return MergeOutcome::StillOpen;
            }
            Err(e) => return failed(collab, &e),
        }
    }

    let accept = AcceptOptions {
        message: options.message.clone(),
        remove_source_branch: options.remove_source,
    };

    prompter.start_progress("Wait ... this can take a while ...");
    let result = collab.platform.accept_mr(mr_iid, &accept).await;
    prompter.finish_progress();

    match result {
        Ok(merged) => {
            prompter.info("");
            prompter.info(&format!("  MR !{} MERGED.", merged.iid));
            prompter.info("");
            let post_merge =
                run_post_merge(collab, MergedMr::Record(merged), &options.post_merge()).await;
            MergeOutcome::Accepted {
                mr_iid,
                recovered: false,
                post_merge,
            }
        }
        Err(e) if e.is_transport() => failed(collab, &e),
        Err(e) if e.is_not_responding() => recover(collab, options, &e).await,
        Err(e) => failed(collab, &e),
    }
}

async fn review(collab: Collaborators<'_>, mr_iid: u64) -> crate::error::Result<()> {
    list_issues(collab, mr_iid).await?;
    list_commits(collab, mr_iid).await?;
    if collab.prompter.confirm("List changes?", false)? {
        list_changes(collab, mr_iid).await?;
    }
    Ok(())
}

/// Decide whether a timed-out accept went through by asking for the state
async fn recover(
    collab: Collaborators<'_>,
    options: &MergeOptions,
    error: &Error,
) -> MergeOutcome {
    let prompter = collab.prompter;
    let mr_iid = options.mr_iid;
    let reason = report_error(prompter, error);
    warn!(mr_iid, %reason, "accept did not answer, re-checking MR state");

    match collab.platform.get_mr(mr_iid).await {
        Ok(mr) if mr.state.is_finalized() => {
            prompter.warn("Even with the error result it seems the MR was merged.");
            prompter.warn(
                "The error may have been generated due to an excessive server response time.",
            );
            let post_merge =
                run_post_merge(collab, MergedMr::Iid(mr_iid), &options.post_merge()).await;
            MergeOutcome::Accepted {
                mr_iid,
                recovered: true,
                post_merge,
            }
        }
        Ok(_) => {
            prompter.warn(STILL_OPEN);
            MergeOutcome::Failed(reason)
        }
        Err(e) => failed(collab, &e),
    }
}
