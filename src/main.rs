//! glflow - merge request flows for GitLab

mod cli;

use anstream::eprintln;
use clap::{Args, Parser, Subcommand};
use cli::style::error_label;
use cli::{CommandContext, RunOptions, TerminalPrompter, run_create, run_flow, run_merge};
use gitlab_flow::flow::DEFAULT_FLOW;
use gitlab_flow::mr::{CreateOptions, MergeOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glflow")]
#[command(about = "Merge request flows for GitLab: push, open, review, accept and tag")]
#[command(version)]
struct Cli {
    /// Path to the git working copy (default: current directory)
    #[arg(long, global = true, default_value = ".")]
    path: PathBuf,

    /// Log GitLab and git calls
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a merge request from the current branch
    Mr(MrArgs),

    /// Accept (merge) a merge request
    #[command(name = "mr-merge")]
    MrMerge(MrMergeArgs),

    /// Run one of the flows described in ".gitlab-flow"
    Run {
        /// Flow to run (a section of ".gitlab-flow")
        #[arg(default_value = DEFAULT_FLOW)]
        flow: String,

        /// List the flows in ".gitlab-flow" instead of running one
        #[arg(long)]
        show_config: bool,
    },
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
struct MrArgs {
    /// Source branch (default: current branch)
    #[arg(long)]
    source: Option<String>,

    /// Target branch (default: GITLAB_DEFAULT_MR_TARGET_BRANCH)
    #[arg(long)]
    target: Option<String>,

    /// MR title (default: derived from the branch or its issue)
    #[arg(short = 'T', long)]
    title: Option<String>,

    /// MR description (default: "Closes #<issue>")
    #[arg(short = 'D', long)]
    description: Option<String>,

    /// Don't ask for an assignee
    #[arg(long)]
    no_assignee: bool,

    /// Don't ask for a milestone
    #[arg(long)]
    no_milestone: bool,

    /// Create a work-in-progress MR
    #[arg(long)]
    wip: bool,

    /// Don't push the source branch before opening the MR
    #[arg(long)]
    no_push: bool,

    /// Merge the MR right after creating it
    #[arg(long)]
    merge: bool,

    /// With --merge: remove the source branch
    #[arg(long)]
    remove_source: bool,

    /// With --merge: check out and pull the target branch afterwards
    #[arg(long)]
    update_local: bool,

    /// With --merge: tag the target branch afterwards
    #[arg(long, value_name = "TAG")]
    tag_after: Option<String>,
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
struct MrMergeArgs {
    /// MR number (iid) in the project
    id: u64,

    /// Message for the merge commit
    #[arg(short, long)]
    message: Option<String>,

    /// Remove the source branch after merging
    #[arg(long)]
    remove_source: bool,

    /// Push the current branch before merging
    #[arg(short = 'P', long)]
    push: bool,

    /// Check out and pull the target branch after merging
    #[arg(long)]
    update_local: bool,

    /// Check out, pull and tag the target branch after merging
    #[arg(long, value_name = "TAG")]
    tag_after: Option<String>,

    /// Don't list issues/commits or ask for confirmation
    #[arg(short, long)]
    yes: bool,
}

impl From<MrArgs> for CreateOptions {
    fn from(args: MrArgs) -> Self {
        Self {
            source: args.source,
            target: args.target,
            title: args.title,
            description: args.description,
            no_assignee: args.no_assignee,
            no_milestone: args.no_milestone,
            wip: args.wip,
            no_push: args.no_push,
            merge: args.merge,
            remove_source: args.remove_source,
            update_local: args.update_local,
            tag_after: args.tag_after,
        }
    }
}

impl From<MrMergeArgs> for MergeOptions {
    fn from(args: MrMergeArgs) -> Self {
        Self {
            mr_iid: args.id,
            message: args.message,
            remove_source: args.remove_source,
            push: args.push,
            update_local: args.update_local,
            tag_after: args.tag_after,
            yes: args.yes,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "gitlab_flow=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatch a parsed command; `Ok(false)` means it ended unsuccessfully
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let succeeded = match cli.command {
        Commands::Mr(args) => {
            let ctx = CommandContext::new(&cli.path, TerminalPrompter::new())?;
            run_create(&ctx, &args.into()).await
        }
        Commands::MrMerge(args) => {
            let ctx = CommandContext::new(&cli.path, TerminalPrompter::new())?;
            run_merge(&ctx, &args.into()).await
        }
        Commands::Run { flow, show_config } => {
            run_flow(&cli.path, &RunOptions { flow, show_config }).await?
        }
    };
    Ok(succeeded)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {e:#}", error_label());
            ExitCode::FAILURE
        }
    }
}
