//! Strategies that register one tracker webhook each. The event token is the hook id.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use bridge_core::{EventToken, Strategy};
use tracing::info;

use super::PlaceSetup;
use crate::github::{IssueTracker, ISSUES_EVENT, ISSUE_COMMENT_EVENT};

async fn register_hook(
    tracker: &dyn IssueTracker,
    event: &str,
    options: &PlaceSetup,
) -> anyhow::Result<EventToken> {
    let hook_id = tracker
        .create_webhook(
            &options.repo,
            &[event],
            &options.callback_url,
            &options.access_token,
        )
        .await?;
    info!(event, hook_id, place_url = %options.place_url, "Webhook registered");
    Ok(EventToken::new(hook_id))
}

async fn unregister_hook(
    tracker: &dyn IssueTracker,
    event: &str,
    options: &PlaceSetup,
) -> anyhow::Result<()> {
    let token = options
        .event_token
        .as_ref()
        .with_context(|| format!("No {} webhook registered for {}", event, options.place_url))?;
    let hook_id: u64 = token
        .decode()
        .with_context(|| format!("Malformed {} webhook token", event))?;
    tracker
        .delete_webhook(&options.repo, hook_id, &options.access_token)
        .await?;
    info!(event, hook_id, place_url = %options.place_url, "Webhook removed");
    Ok(())
}

/// Subscribes the place to issue events.
pub struct IssueStrategy {
    tracker: Arc<dyn IssueTracker>,
}

impl IssueStrategy {
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl Strategy<PlaceSetup> for IssueStrategy {
    fn name(&self) -> &str {
        "IssueStrategy"
    }

    async fn setup(&self, options: &PlaceSetup) -> anyhow::Result<EventToken> {
        register_hook(self.tracker.as_ref(), ISSUES_EVENT, options).await
    }

    async fn teardown(&self, options: &PlaceSetup) -> anyhow::Result<()> {
        unregister_hook(self.tracker.as_ref(), ISSUES_EVENT, options).await
    }
}

/// Subscribes the place to issue comment events.
pub struct IssueCommentStrategy {
    tracker: Arc<dyn IssueTracker>,
}

impl IssueCommentStrategy {
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl Strategy<PlaceSetup> for IssueCommentStrategy {
    fn name(&self) -> &str {
        "IssueCommentStrategy"
    }

    async fn setup(&self, options: &PlaceSetup) -> anyhow::Result<EventToken> {
        register_hook(self.tracker.as_ref(), ISSUE_COMMENT_EVENT, options).await
    }

    async fn teardown(&self, options: &PlaceSetup) -> anyhow::Result<()> {
        unregister_hook(self.tracker.as_ref(), ISSUE_COMMENT_EVENT, options).await
    }
}
