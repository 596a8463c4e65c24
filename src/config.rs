//! Environment configuration
//!
//! Read once at startup; nothing here is mutated afterwards.

use crate::error::{Error, Result};

/// Base URL of the GitLab v4 API
pub const ENV_API_URL: &str = "GITLAB_API_URL";
/// Personal or project access token
pub const ENV_API_TOKEN: &str = "GITLAB_API_TOKEN";
/// Project every command operates on
pub const ENV_PROJECT_ID: &str = "GITLAB_DEFAULT_PROJECT_ID";
/// Target branch used when `--target` is not given
pub const ENV_TARGET_BRANCH: &str = "GITLAB_DEFAULT_MR_TARGET_BRANCH";

const DEFAULT_API_URL: &str = "https://gitlab.com/api/v4/";
const DEFAULT_TARGET_BRANCH: &str = "dev";

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// GitLab v4 API root
    pub api_url: String,
    /// Access token sent as `PRIVATE-TOKEN`
    pub token: String,
    /// Numeric id or `group/project` path
    pub project_id: String,
    /// Default MR target branch
    pub default_target_branch: String,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get(ENV_API_TOKEN).ok_or_else(|| {
            Error::Config(format!("{ENV_API_TOKEN} environment variable is required"))
        })?;
        let project_id = get(ENV_PROJECT_ID).ok_or_else(|| {
            Error::Config(format!("{ENV_PROJECT_ID} environment variable is required"))
        })?;

        Ok(Self {
            api_url: get(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token,
            project_id,
            default_target_branch: get(ENV_TARGET_BRANCH)
                .unwrap_or_else(|| DEFAULT_TARGET_BRANCH.to_string()),
        })
    }
}
