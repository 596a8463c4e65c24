//! Shared command context for CLI commands
//!
//! Extracts the setup shared by `mr`, `mr-merge` and `run`.

use crate::cli::terminal::TerminalPrompter;
use gitlab_flow::config::Config;
use gitlab_flow::error::Result;
use gitlab_flow::mr::Collaborators;
use gitlab_flow::platform::{GitLabService, PlatformService};
use gitlab_flow::vcs::GitCli;
use std::path::Path;

/// Everything a command needs to talk to GitLab, git and the operator
///
/// Built once per invocation; nothing survives the process.
pub struct CommandContext {
    /// Environment configuration
    pub config: Config,
    /// GitLab service for the configured project
    pub platform: Box<dyn PlatformService>,
    /// git in the working directory
    pub vcs: GitCli,
    /// Terminal prompts and output
    pub prompter: TerminalPrompter,
}

impl CommandContext {
    /// Load configuration and build the collaborators
    pub fn new(path: &Path, prompter: TerminalPrompter) -> Result<Self> {
        let config = Config::from_env()?;
        let platform = GitLabService::new(
            &config.api_url,
            config.token.clone(),
            config.project_id.clone(),
        )?;

        Ok(Self {
            config,
            platform: Box::new(platform),
            vcs: GitCli::new(path),
            prompter,
        })
    }

    /// Borrow the collaborators for one orchestration
    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            platform: self.platform.as_ref(),
            vcs: &self.vcs,
            prompter: &self.prompter,
        }
    }

    /// Target branch used when none is given
    pub fn default_target(&self) -> &str {
        &self.config.default_target_branch
    }
}
