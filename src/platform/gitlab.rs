//! GitLab platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    AcceptOptions, Change, Commit, Issue, Member, MergeRequest, Milestone, MrState,
    NewMergeRequest, Tag,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    api_url: String,
    project_id: String,
}

#[derive(Deserialize)]
struct ApiUser {
    name: String,
}

#[derive(Deserialize)]
struct ApiMilestone {
    title: String,
}

#[derive(Deserialize)]
struct ApiMergeRequest {
    iid: u64,
    state: String, // "opened", "closed", "merged", "locked"
    source_branch: String,
    target_branch: String,
    title: String,
    description: Option<String>,
    assignee: Option<ApiUser>,
    milestone: Option<ApiMilestone>,
    web_url: String,
}

#[derive(Deserialize)]
struct ApiIssue {
    iid: u64,
    title: String,
    description: Option<String>,
    author: ApiUser,
    assignee: Option<ApiUser>,
    created_at: DateTime<Utc>,
}

/// `/merge_requests/:iid/changes` wraps the file list in the MR object
#[derive(Deserialize)]
struct ApiChanges {
    changes: Vec<Change>,
}

impl From<ApiMergeRequest> for MergeRequest {
    fn from(mr: ApiMergeRequest) -> Self {
        Self {
            iid: mr.iid,
            state: MrState::from_api(&mr.state),
            source_branch: mr.source_branch,
            target_branch: mr.target_branch,
            title: mr.title,
            description: mr.description,
            assignee: mr.assignee.map(|a| a.name),
            milestone: mr.milestone.map(|m| m.title),
            web_url: mr.web_url,
        }
    }
}

impl From<ApiIssue> for Issue {
    fn from(issue: ApiIssue) -> Self {
        Self {
            iid: issue.iid,
            title: issue.title,
            description: issue.description,
            author_name: issue.author.name,
            assignee_name: issue.assignee.map(|a| a.name),
            created_at: issue.created_at,
        }
    }
}

#[derive(Serialize)]
struct CreateMrPayload<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    milestone_id: Option<u64>,
}

#[derive(Serialize)]
struct AcceptMrPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_commit_message: Option<&'a str>,
    should_remove_source_branch: bool,
}

#[derive(Serialize)]
struct CreateTagPayload<'a> {
    tag_name: &'a str,
    #[serde(rename = "ref")]
    git_ref: &'a str,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest response body excerpt carried in an HTTP error
const BODY_SUMMARY_LEN: usize = 120;

/// Page size for list endpoints
const PER_PAGE: &str = "100";

impl GitLabService {
    /// Create a new GitLab service for one project
    ///
    /// `api_url` is the v4 API root, e.g. `https://gitlab.com/api/v4/`.
    /// `project_id` is either the numeric id or the `group/project` path.
    pub fn new(api_url: &str, token: String, project_id: String) -> Result<Self> {
        let parsed = url::Url::parse(api_url)
            .map_err(|e| Error::Config(format!("invalid GitLab API URL {api_url:?}: {e}")))?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::GitLabApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            api_url: parsed.as_str().trim_end_matches('/').to_string(),
            project_id,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/projects/{}{}",
            self.api_url,
            urlencoding::encode(&self.project_id),
            path
        )
    }

    fn mr_url(&self, mr_iid: u64, suffix: &str) -> String {
        self.api_url(&format!("/merge_requests/{mr_iid}{suffix}"))
    }

    /// Send an authenticated request and decode a JSON answer
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response.json().await.map_err(map_send_error)
    }
}

fn map_send_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::NotResponding(e.to_string())
    } else {
        Error::Reqwest(e)
    }
}

/// Gateway errors mean the request may still be running on the server,
/// so they are reported like a timeout rather than a plain HTTP failure.
fn status_error(status: StatusCode, body: &str) -> Error {
    let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
    match status {
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            Error::NotResponding(format!("{} {reason}", status.as_u16()))
        }
        _ => Error::Http {
            status: status.as_u16(),
            reason,
            body: summarize_body(body),
        },
    }
}

fn summarize_body(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= BODY_SUMMARY_LEN {
        return body.to_string();
    }
    let excerpt: String = body.chars().take(BODY_SUMMARY_LEN).collect();
    format!("{excerpt} (truncated...)")
}

#[async_trait]
impl PlatformService for GitLabService {
    async fn get_mr(&self, mr_iid: u64) -> Result<MergeRequest> {
        debug!(mr_iid, "getting MR");
        let mr: ApiMergeRequest = self
            .send(self.client.get(self.mr_url(mr_iid, "")))
            .await?;

        let mr: MergeRequest = mr.into();
        debug!(mr_iid, state = %mr.state, "got MR");
        Ok(mr)
    }

    async fn get_mr_commits(&self, mr_iid: u64) -> Result<Vec<Commit>> {
        debug!(mr_iid, "listing MR commits");
        let commits: Vec<Commit> = self
            .send(
                self.client
                    .get(self.mr_url(mr_iid, "/commits"))
                    .query(&[("per_page", PER_PAGE)]),
            )
            .await?;

        debug!(mr_iid, count = commits.len(), "listed MR commits");
        Ok(commits)
    }

    async fn get_mr_issues(&self, mr_iid: u64) -> Result<Vec<Issue>> {
        debug!(mr_iid, "listing issues closed by MR");
        let issues: Vec<ApiIssue> = self
            .send(self.client.get(self.mr_url(mr_iid, "/closes_issues")))
            .await?;

        debug!(mr_iid, count = issues.len(), "listed issues closed by MR");
        Ok(issues.into_iter().map(Into::into).collect())
    }

    async fn get_mr_changes(&self, mr_iid: u64) -> Result<Vec<Change>> {
        debug!(mr_iid, "listing MR changes");
        let changes: ApiChanges = self
            .send(self.client.get(self.mr_url(mr_iid, "/changes")))
            .await?;

        debug!(mr_iid, count = changes.changes.len(), "listed MR changes");
        Ok(changes.changes)
    }

    async fn create_mr(&self, mr: &NewMergeRequest) -> Result<MergeRequest> {
        debug!(
            source = %mr.source_branch,
            target = %mr.target_branch,
            "creating MR"
        );
        let payload = CreateMrPayload {
            source_branch: &mr.source_branch,
            target_branch: &mr.target_branch,
            title: &mr.title,
            description: mr.description.as_deref(),
            assignee_id: mr.assignee_id,
            milestone_id: mr.milestone_id,
        };

        let created: ApiMergeRequest = self
            .send(
                self.client
                    .post(self.api_url("/merge_requests"))
                    .json(&payload),
            )
            .await?;

        let created: MergeRequest = created.into();
        debug!(mr_iid = created.iid, "created MR");
        Ok(created)
    }

    async fn accept_mr(&self, mr_iid: u64, options: &AcceptOptions) -> Result<MergeRequest> {
        debug!(
            mr_iid,
            remove_source = options.remove_source_branch,
            "accepting MR"
        );
        let payload = AcceptMrPayload {
            merge_commit_message: options.message.as_deref(),
            should_remove_source_branch: options.remove_source_branch,
        };

        let merged: ApiMergeRequest = self
            .send(self.client.put(self.mr_url(mr_iid, "/merge")).json(&payload))
            .await?;

        let merged: MergeRequest = merged.into();
        debug!(mr_iid, state = %merged.state, "accepted MR");
        Ok(merged)
    }

    async fn create_tag(&self, name: &str, git_ref: &str) -> Result<Tag> {
        debug!(name, git_ref, "creating tag");
        let tag: Tag = self
            .send(
                self.client
                    .post(self.api_url("/repository/tags"))
                    .json(&CreateTagPayload {
                        tag_name: name,
                        git_ref,
                    }),
            )
            .await?;

        debug!(name, target = %tag.target, "created tag");
        Ok(tag)
    }

    async fn get_project_members(&self) -> Result<Vec<Member>> {
        debug!("listing project members");
        let members: Vec<Member> = self
            .send(
                self.client
                    .get(self.api_url("/members/all"))
                    .query(&[("per_page", PER_PAGE)]),
            )
            .await?;

        debug!(count = members.len(), "listed project members");
        Ok(members)
    }

    async fn get_project_milestones(&self, active_only: bool) -> Result<Vec<Milestone>> {
        debug!(active_only, "listing project milestones");
        let mut request = self
            .client
            .get(self.api_url("/milestones"))
            .query(&[("per_page", PER_PAGE)]);
        if active_only {
            request = request.query(&[("state", "active")]);
        }

        let milestones: Vec<Milestone> = self.send(request).await?;

        debug!(count = milestones.len(), "listed project milestones");
        Ok(milestones)
    }

    async fn get_issue(&self, issue_iid: u64) -> Result<Issue> {
        debug!(issue_iid, "getting issue");
        let issue: ApiIssue = self
            .send(self.client.get(self.api_url(&format!("/issues/{issue_iid}"))))
            .await?;

        Ok(issue.into())
    }
}
