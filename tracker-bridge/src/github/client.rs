//! GitHub REST v3 client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{Issue, IssueTracker, RepoRef};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "tracker-bridge";
const ACCEPT: &str = "application/vnd.github+json";

/// [`IssueTracker`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    /// `api_url` is the REST base, e.g. `https://api.github.com` or a mock server URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(client: Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn repo_url(&self, repo: &RepoRef, path: &str) -> String {
        format!("{}/repos/{}/{}{}", self.api_url, repo.owner, repo.repo, path)
    }

    fn authorized(&self, request: RequestBuilder, access_token: &str) -> RequestBuilder {
        request
            .header("Authorization", format!("token {}", access_token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
    }
}

#[derive(Debug, Serialize)]
struct HookConfig<'a> {
    url: &'a str,
    content_type: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateHookRequest<'a> {
    name: &'a str,
    active: bool,
    events: &'a [&'a str],
    config: HookConfig<'a>,
}

#[derive(Debug, Deserialize)]
struct CreateHookResponse {
    id: u64,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

async fn ensure_success(response: Response) -> anyhow::Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("GitHub API error ({}): {}", status, error_text));
    }
    Ok(response)
}

#[async_trait]
impl IssueTracker for GitHubClient {
    #[instrument(skip(self, access_token), fields(repo = %repo))]
    async fn create_webhook(
        &self,
        repo: &RepoRef,
        events: &[&str],
        callback_url: &str,
        access_token: &str,
    ) -> anyhow::Result<u64> {
        info!(?events, callback_url = %callback_url, "step: GitHub create webhook");

        let request = CreateHookRequest {
            name: "web",
            active: true,
            events,
            config: HookConfig {
                url: callback_url,
                content_type: "json",
            },
        };
        let response = self
            .authorized(self.client.post(self.repo_url(repo, "/hooks")), access_token)
            .json(&request)
            .send()
            .await?;
        let hook: CreateHookResponse = ensure_success(response).await?.json().await?;

        info!(hook_id = hook.id, "step: GitHub create webhook done");
        Ok(hook.id)
    }

    #[instrument(skip(self, access_token), fields(repo = %repo))]
    async fn delete_webhook(
        &self,
        repo: &RepoRef,
        hook_id: u64,
        access_token: &str,
    ) -> anyhow::Result<()> {
        info!(hook_id, "step: GitHub delete webhook");
        let url = self.repo_url(repo, &format!("/hooks/{}", hook_id));
        let response = self
            .authorized(self.client.delete(url), access_token)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    #[instrument(skip(self, body, access_token), fields(repo = %repo))]
    async fn add_comment(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        body: &str,
        access_token: &str,
    ) -> anyhow::Result<()> {
        info!(issue_number, body_len = body.len(), "step: GitHub add comment");
        let url = self.repo_url(repo, &format!("/issues/{}/comments", issue_number));
        let response = self
            .authorized(self.client.post(url), access_token)
            .json(&CommentRequest { body })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    #[instrument(skip(self, access_token), fields(repo = %repo))]
    async fn recent_issues(
        &self,
        repo: &RepoRef,
        limit: usize,
        access_token: &str,
    ) -> anyhow::Result<Vec<Issue>> {
        let url = self.repo_url(
            repo,
            &format!("/issues?state=open&sort=updated&per_page={}", limit),
        );
        let response = self
            .authorized(self.client.get(url), access_token)
            .send()
            .await?;
        let issues: Vec<Issue> = ensure_success(response).await?.json().await?;

        let issues: Vec<Issue> = issues
            .into_iter()
            .filter(|issue| issue.pull_request.is_none())
            .take(limit)
            .collect();
        info!(count = issues.len(), "step: GitHub recent issues fetched");
        Ok(issues)
    }
}
