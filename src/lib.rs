//! gitlab-flow - merge request flows for GitLab
//!
//! Opens, reviews, accepts and tags GitLab merge requests from the
//! terminal, and replays saved option sets ("flows") from a
//! `.gitlab-flow` file.
//!
//! The orchestration in [`mr`] talks to the outside world only through
//! three injected capabilities: [`platform::PlatformService`] (GitLab),
//! [`vcs::Vcs`] (local git) and [`interact::Prompter`] (the operator).

pub mod config;
pub mod error;
pub mod flow;
pub mod interact;
pub mod mr;
pub mod platform;
pub mod types;
pub mod vcs;
