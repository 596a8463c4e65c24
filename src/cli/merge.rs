//! `mr-merge` command - accept a merge request

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use gitlab_flow::mr::{MergeOptions, MergeOutcome, PostMergeOutcome, merge_mr};

/// Run the merge command; returns whether it ended successfully
#[allow(clippy::future_not_send)]
pub async fn run_merge(ctx: &CommandContext, options: &MergeOptions) -> bool {
    let outcome = merge_mr(ctx.collaborators(), options).await;
    print_merge_summary(&outcome)
}

/// Print the closing summary of a merge attempt
///
/// A declined confirmation counts as success: the operator chose to stop.
pub fn print_merge_summary(outcome: &MergeOutcome) -> bool {
    match outcome {
        MergeOutcome::Accepted {
            mr_iid,
            recovered,
            post_merge,
        } => {
            let note = if *recovered {
                " (confirmed after timeout)".muted()
            } else {
                String::new()
            };
            println!(
                "{} MR {} merged{note}",
                check(),
                format!("!{mr_iid}").accent()
            );
            print_post_merge(post_merge);
            true
        }
        MergeOutcome::StillOpen => true,
        MergeOutcome::Aborted(_) | MergeOutcome::Failed(_) => false,
    }
}

fn print_post_merge(outcome: &PostMergeOutcome) {
    match outcome {
        PostMergeOutcome::NotRequested => {}
        PostMergeOutcome::Completed { target_branch, tag } => {
            println!("   Local {} is up to date", target_branch.accent());
            if let Some(tag) = tag {
                println!("   Tagged {}", tag.accent());
            }
        }
        PostMergeOutcome::CheckoutFailed(status) => println!(
            "{}",
            format!("⚠️  Checkout failed ({status}); post-merge actions stopped").warn()
        ),
        PostMergeOutcome::PullFailed(status) => println!(
            "{}",
            format!("⚠️  Pull failed ({status}); post-merge actions stopped").warn()
        ),
        PostMergeOutcome::Failed(reason) => {
            println!("{}", "⚠️  Post-merge actions stopped".warn());
            println!("   {}", reason.muted());
        }
    }
}
