//! MR creation
//!
//! Gather (branches, push, issue title, assignee, milestone), then a
//! single create call, then optionally hand the new MR to [`merge_mr`].

use crate::error::Result;
use crate::mr::branch::{default_description, default_title, issue_ref, with_wip};
use crate::mr::merge::merge_mr;
use crate::mr::push::push_branch;
use crate::mr::{Collaborators, CreateOptions, CreateOutcome, MergeOptions, report_error};
use crate::types::NewMergeRequest;
use tracing::debug;

const NO_ASSIGNEE: &str = "No assignee";
const NO_MILESTONE: &str = "No milestone";

enum Prepared {
    Ready(NewMergeRequest),
    Cancelled,
}

/// Open an MR, and merge it right away when `options.merge` is set
///
/// `default_target` is used when no target branch is given.
pub async fn create_mr(
    collab: Collaborators<'_>,
    options: &CreateOptions,
    default_target: &str,
) -> CreateOutcome {
    let prompter = collab.prompter;

    let request = match prepare(collab, options, default_target).await {
        Ok(Prepared::Ready(request)) => request,
        Ok(Prepared::Cancelled) => {
            return CreateOutcome::Aborted("push failed, MR not created".to_string());
        }
        Err(e) => return CreateOutcome::Failed(report_error(prompter, &e)),
    };
    debug!(
        source = %request.source_branch,
        target = %request.target_branch,
        title = %request.title,
        "prepared MR"
    );

    prompter.start_progress("Creating MR ... wait ... this can take a while ...");
    let created = collab.platform.create_mr(&request).await;
    prompter.finish_progress();

    let created = match created {
        Ok(mr) => mr,
        Err(e) => return CreateOutcome::Failed(report_error(prompter, &e)),
    };

    prompter.info("");
    prompter.info(&format!("  MR !{} created.", created.iid));
    prompter.info("");

    if !options.merge {
        return CreateOutcome::Created {
            mr_iid: created.iid,
            web_url: created.web_url,
            merge: None,
        };
    }

    prompter.line("");
    prompter.line("--------------------------");
    prompter.info("*  Calling Accept Merge  *");
    prompter.line("--------------------------");
    prompter.line("");

    let merge = MergeOptions {
        mr_iid: created.iid,
        remove_source: options.remove_source,
        update_local: options.update_local,
        tag_after: options.tag_after.clone(),
        ..MergeOptions::default()
    };
    let outcome = merge_mr(collab, &merge).await;

    CreateOutcome::Created {
        mr_iid: created.iid,
        web_url: created.web_url,
        merge: Some(outcome),
    }
}

async fn prepare(
    collab: Collaborators<'_>,
    options: &CreateOptions,
    default_target: &str,
) -> Result<Prepared> {
    let prompter = collab.prompter;

    let target = options
        .target
        .clone()
        .unwrap_or_else(|| default_target.to_string());
    let source = match &options.source {
        Some(source) => source.clone(),
        None => collab.vcs.current_branch().await?,
    };

    if !options.no_push
        && prompter.confirm("PUSH changes before opening the MR?", true)?
        && !push_branch(collab, &source).await?.proceed()
    {
        return Ok(Prepared::Cancelled);
    }

    let issue = issue_ref(&source);

    let title = match &options.title {
        Some(title) => title.clone(),
        None => {
            let issue_title = match issue {
                Some(issue_iid) => {
                    prompter.info("Loading issue title ...");
                    Some(collab.platform.get_issue(issue_iid).await?.title)
                }
                None => None,
            };
            let title = default_title(&source, issue_title.as_deref());
            if issue_title.is_some() {
                prompter.warn(&format!("Title: {title}"));
            }
            title
        }
    };
    let title = with_wip(title, options.wip);

    let description = options
        .description
        .clone()
        .or_else(|| default_description(issue));

    let assignee_id = if options.no_assignee {
        None
    } else {
        ask_assignee(collab).await?
    };

    let milestone_id = if options.no_milestone {
        None
    } else {
        ask_milestone(collab).await?
    };

    Ok(Prepared::Ready(NewMergeRequest {
        source_branch: source,
        target_branch: target,
        title,
        description,
        assignee_id,
        milestone_id,
    }))
}

/// Offer `None` first, then one entry per item; map the pick back to an id
fn pick<T>(
    collab: Collaborators<'_>,
    question: &str,
    none_label: &str,
    items: &[T],
    label: impl Fn(&T) -> String,
    id: impl Fn(&T) -> u64,
) -> Result<Option<u64>> {
    let mut choices = vec![none_label.to_string()];
    choices.extend(items.iter().map(&label));

    let picked = collab.prompter.choose(question, &choices)?;
    Ok(picked.checked_sub(1).and_then(|i| items.get(i)).map(id))
}

async fn ask_assignee(collab: Collaborators<'_>) -> Result<Option<u64>> {
    collab.prompter.info("Loading members ...");
    let members = collab.platform.get_project_members().await?;
    pick(
        collab,
        "Assignee to:",
        NO_ASSIGNEE,
        &members,
        |m| m.name.clone(),
        |m| m.id,
    )
}

async fn ask_milestone(collab: Collaborators<'_>) -> Result<Option<u64>> {
    collab.prompter.info("Loading milestones ...");
    let milestones = collab.platform.get_project_milestones(true).await?;
    pick(
        collab,
        "Milestone:",
        NO_MILESTONE,
        &milestones,
        |m| m.title.clone(),
        |m| m.id,
    )
}
