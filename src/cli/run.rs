//! `run` command - replay a flow from `.gitlab-flow`

use crate::cli::context::CommandContext;
use crate::cli::create::run_create;
use crate::cli::merge::run_merge;
use crate::cli::style::Stylize;
use crate::cli::terminal::TerminalPrompter;
use anstream::println;
use gitlab_flow::error::Result;
use gitlab_flow::flow::{FlowFile, FlowInvocation, describe_flows, flow_banner, resolve_flow};
use gitlab_flow::interact::Prompter;
use std::path::Path;

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Flow (section) to run
    pub flow: String,
    /// List the flows instead of running one
    pub show_config: bool,
}

/// Run the flow command; returns whether the flow ended successfully
///
/// A missing flow file or section is an error, which the caller turns
/// into a non-zero exit. Configuration is read before any `ask` prompt.
#[allow(clippy::future_not_send)]
pub async fn run_flow(path: &Path, options: &RunOptions) -> Result<bool> {
    let file = FlowFile::load_from_dir(path)?;

    if options.show_config {
        for line in describe_flows(&file) {
            println!("{line}");
        }
        return Ok(true);
    }

    let definition = file.flow(&options.flow)?;
    let ctx = CommandContext::new(path, TerminalPrompter::new())?;
    ctx.prompter.info("Loading flow");
    let resolved = resolve_flow(&options.flow, definition, &ctx.prompter)?;
    let invocation = resolved.invocation()?;

    println!();
    for line in flow_banner(&resolved) {
        println!("{}", line.emphasis());
    }
    println!();

    let succeeded = match invocation {
        FlowInvocation::CreateMr(create) => run_create(&ctx, &create).await,
        FlowInvocation::MergeMr(merge) => run_merge(&ctx, &merge).await,
    };
    Ok(succeeded)
}
