//! Error types for gitlab-flow

use thiserror::Error;

/// Marker the GitLab service uses when a request got no answer in time.
///
/// Merge orchestration matches on this text (case-insensitively) to decide
/// whether an accept call may have been applied server side.
pub const NOT_RESPONDING_MARKER: &str = "GitLab is not responding";

/// Errors surfaced by gitlab-flow
#[derive(Debug, Error)]
pub enum Error {
    /// GitLab answered with a non-success HTTP status
    #[error("Http status error: {status} - {reason}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        reason: String,
        /// Short summary of the response body
        body: String,
    },

    /// GitLab did not answer before the client gave up
    #[error("{marker}: {0}", marker = NOT_RESPONDING_MARKER)]
    NotResponding(String),

    /// Any other GitLab API failure
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Transport failure from the HTTP client
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid or missing flow definition
    #[error("flow error: {0}")]
    Flow(String),

    /// Local version control command could not be run
    #[error("git error: {0}")]
    Vcs(String),

    /// Prompt or other internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for HTTP status errors reported by GitLab.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// True if the rendered message says GitLab did not respond.
    pub fn is_not_responding(&self) -> bool {
        self.to_string()
            .to_lowercase()
            .contains(&NOT_RESPONDING_MARKER.to_lowercase())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
