//! Issue tracker (GitHub) access: repository/issue types, the [`IssueTracker`] trait and its
//! REST implementation.

mod client;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use client::{GitHubClient, DEFAULT_GITHUB_API_URL};

/// Webhook event name for issue activity.
pub const ISSUES_EVENT: &str = "issues";
/// Webhook event name for issue comment activity.
pub const ISSUE_COMMENT_EVENT: &str = "issue_comment";

/// `owner/repo` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueUser {
    pub login: String,
}

/// Issue fields the bridge reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub user: Option<IssueUser>,
    /// Present only when the "issue" is a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<Value>,
}

/// Tracker operations used by strategies, comment mirroring and the issues tile.
/// `access_token` is the OAuth token of the linked place.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Registers a webhook for `events` delivering to `callback_url`; returns the hook id.
    async fn create_webhook(
        &self,
        repo: &RepoRef,
        events: &[&str],
        callback_url: &str,
        access_token: &str,
    ) -> anyhow::Result<u64>;

    async fn delete_webhook(
        &self,
        repo: &RepoRef,
        hook_id: u64,
        access_token: &str,
    ) -> anyhow::Result<()>;

    async fn add_comment(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        body: &str,
        access_token: &str,
    ) -> anyhow::Result<()>;

    /// Open issues, most recently updated first, pull requests excluded.
    async fn recent_issues(
        &self,
        repo: &RepoRef,
        limit: usize,
        access_token: &str,
    ) -> anyhow::Result<Vec<Issue>>;
}
