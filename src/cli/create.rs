//! `mr` command - open a merge request

use crate::cli::context::CommandContext;
use crate::cli::merge::print_merge_summary;
use crate::cli::style::{Stylize, hyperlink};
use anstream::println;
use gitlab_flow::mr::{CreateOptions, CreateOutcome, create_mr};

/// Run the create command; returns whether it ended successfully
#[allow(clippy::future_not_send)]
pub async fn run_create(ctx: &CommandContext, options: &CreateOptions) -> bool {
    let outcome = create_mr(ctx.collaborators(), options, ctx.default_target()).await;

    match &outcome {
        CreateOutcome::Created {
            mr_iid,
            web_url,
            merge,
        } => {
            println!(
                "   {} {}",
                format!("!{mr_iid}").accent(),
                hyperlink(web_url, web_url)
            );
            merge.as_ref().is_none_or(print_merge_summary)
        }
        CreateOutcome::Aborted(reason) => {
            println!("{}", reason.muted());
            false
        }
        CreateOutcome::Failed(_) => false,
    }
}
