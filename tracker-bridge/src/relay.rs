//! Relays tracker activity into the platform: opened issues become discussions, issue
//! comments become replies on those discussions.

use std::sync::Arc;

use anyhow::Context;
use bridge_core::ContentError;
use content_builder::{Content, ContentBuilder};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::comments::COMMENT_MARKER;
use crate::config::LinkedPlace;
use crate::github::{Issue, IssueUser};
use crate::platform::{
    self_ref, Platform, PlatformDirectory, FROM_TRACKER_PROP, ISSUE_NUMBER_PROP,
};

/// Tag added to every relayed discussion.
pub const TRACKER_TAG: &str = "github";

/// Payload of an `issues` webhook delivery (fields the relay reads).
#[derive(Debug, Clone, Deserialize)]
pub struct IssuesEvent {
    pub action: String,
    pub issue: Issue,
}

/// A comment on a tracker issue.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerComment {
    pub body: String,
    pub html_url: String,
    #[serde(default)]
    pub user: Option<IssueUser>,
}

/// Payload of an `issue_comment` webhook delivery (fields the relay reads).
#[derive(Debug, Clone, Deserialize)]
pub struct IssueCommentEvent {
    pub action: String,
    pub issue: Issue,
    pub comment: TrackerComment,
}

fn resource_uri<'a>(url: &'a str, segment: &str) -> &'a str {
    url.find(segment).map(|i| &url[i..]).unwrap_or(url)
}

/// `/places/{id}` part of an absolute place URL; other input is returned as-is.
pub fn place_uri(place_url: &str) -> &str {
    resource_uri(place_url, "/places/")
}

/// `/contents/{id}` part of an absolute content URL; other input is returned as-is.
pub fn content_uri(content_url: &str) -> &str {
    resource_uri(content_url, "/contents/")
}

fn linked_places<'a>(
    places: &'a [LinkedPlace],
    owner: &str,
    repo: &str,
) -> anyhow::Result<Vec<&'a LinkedPlace>> {
    let linked: Vec<_> = places
        .iter()
        .filter(|p| p.owner == owner && p.repo == repo)
        .collect();
    if linked.is_empty() {
        anyhow::bail!("No place linked to {}/{}", owner, repo);
    }
    Ok(linked)
}

/// Discussion for `issue` in the place: subject `[#n] title`, issue body (or its link when
/// empty), tagged `github` and `issue-n`.
pub fn issue_discussion(place: &LinkedPlace, issue: &Issue) -> Result<Content, ContentError> {
    let text = issue
        .body
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or(&issue.html_url);

    let mut builder = ContentBuilder::new();
    builder
        .discussion()
        .subject(format!("[#{}] {}", issue.number, issue.title))
        .body(text)?
        .parent(place_uri(&place.place_url))?
        .tags(vec![TRACKER_TAG.to_string(), format!("issue-{}", issue.number)])?;
    Ok(builder.build()?.clone())
}

/// Reply on `discussion_url` carrying a tracker comment:
/// `[[GitHub](comment link) - login] body`.
pub fn comment_message(
    discussion_url: &str,
    comment: &TrackerComment,
) -> Result<Content, ContentError> {
    let author = comment
        .user
        .as_ref()
        .map(|u| u.login.as_str())
        .unwrap_or("unknown");
    let text = format!("[[GitHub]({}) - {}] {}", comment.html_url, author, comment.body);

    let mut builder = ContentBuilder::new();
    builder.message().body(text)?.parent(content_uri(discussion_url))?;
    Ok(builder.build()?.clone())
}

async fn mark_created(
    platform: &dyn Platform,
    created: &Value,
    key: &str,
    value: Value,
) -> anyhow::Result<()> {
    let url = self_ref(created).context("Created content has no self reference")?;
    let mut props = Map::new();
    props.insert(key.to_string(), value);
    platform.set_ext_props(url, &props).await
}

pub struct IssueRelay {
    platform: Arc<dyn Platform>,
}

impl IssueRelay {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }

    /// Creates a discussion for an `opened` event; other actions are ignored (`Ok(None)`).
    #[instrument(skip(self, place, event), fields(action = %event.action, issue = event.issue.number))]
    pub async fn on_issue_event(
        &self,
        place: &LinkedPlace,
        event: &IssuesEvent,
    ) -> anyhow::Result<Option<Value>> {
        if event.action != "opened" {
            debug!("Ignoring issue action");
            return Ok(None);
        }
        let content = issue_discussion(place, &event.issue)?;
        let created = self.platform.create_content(&content).await?;
        mark_created(
            self.platform.as_ref(),
            &created,
            ISSUE_NUMBER_PROP,
            Value::from(event.issue.number),
        )
        .await?;
        info!(place_url = %place.place_url, "step: issue relayed as discussion");
        Ok(Some(created))
    }

    /// Relays the event to every place linked to `owner/repo`; returns how many discussions
    /// were created. Fails when no place is linked.
    pub async fn relay_to_linked(
        &self,
        places: &[LinkedPlace],
        owner: &str,
        repo: &str,
        event: &IssuesEvent,
    ) -> anyhow::Result<usize> {
        let mut created = 0;
        for place in linked_places(places, owner, repo)? {
            if self.on_issue_event(place, event).await?.is_some() {
                created += 1;
            }
        }
        Ok(created)
    }
}

/// Posts tracker issue comments as replies on the discussion relayed for the issue.
pub struct IssueCommentRelay {
    platform: Arc<dyn Platform>,
    directory: Arc<dyn PlatformDirectory>,
}

impl IssueCommentRelay {
    pub fn new(platform: Arc<dyn Platform>, directory: Arc<dyn PlatformDirectory>) -> Self {
        Self {
            platform,
            directory,
        }
    }

    /// Replies for a `created` comment. Ignored (`Ok(None)`) for other actions, for comments
    /// the bridge mirrored from the platform, and when the issue has no discussion here.
    #[instrument(skip(self, place, event), fields(action = %event.action, issue = event.issue.number))]
    pub async fn on_comment_event(
        &self,
        place: &LinkedPlace,
        event: &IssueCommentEvent,
    ) -> anyhow::Result<Option<Value>> {
        if event.action != "created" {
            debug!("Ignoring comment action");
            return Ok(None);
        }
        if event.comment.body.starts_with(COMMENT_MARKER) {
            debug!("Comment was mirrored from the platform, not relaying");
            return Ok(None);
        }
        let Some(discussion_url) = self
            .directory
            .find_discussion(&place.place_url, event.issue.number)
            .await?
        else {
            debug!(place_url = %place.place_url, "No discussion for issue");
            return Ok(None);
        };

        let content = comment_message(&discussion_url, &event.comment)?;
        let created = self.platform.create_content(&content).await?;
        mark_created(
            self.platform.as_ref(),
            &created,
            FROM_TRACKER_PROP,
            Value::Bool(true),
        )
        .await?;
        info!(%discussion_url, "step: issue comment relayed");
        Ok(Some(created))
    }

    /// Relays the event to every place linked to `owner/repo`; returns how many replies were
    /// created. Fails when no place is linked.
    pub async fn relay_to_linked(
        &self,
        places: &[LinkedPlace],
        owner: &str,
        repo: &str,
        event: &IssueCommentEvent,
    ) -> anyhow::Result<usize> {
        let mut created = 0;
        for place in linked_places(places, owner, repo)? {
            if self.on_comment_event(place, event).await?.is_some() {
                created += 1;
            }
        }
        Ok(created)
    }
}
