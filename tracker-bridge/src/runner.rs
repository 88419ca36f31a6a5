//! Entry points: build the clients from config, then either run the tile refresher until
//! Ctrl-C or handle a single webhook event.

use std::sync::Arc;

use anyhow::Result;
use bridge_core::init_tracing;
use tracing::{info, instrument, warn};

use crate::comments::{CommentMirror, MirrorOutcome};
use crate::config::{BridgeConfig, LinkedPlace};
use crate::github::{GitHubClient, IssueTracker};
use crate::platform::{CommentEvent, RestPlatform};
use crate::relay::{IssueCommentEvent, IssueCommentRelay, IssueRelay, IssuesEvent};
use crate::strategies::webhook_strategy_set;
use crate::tiles::TileRefresher;

/// Clients built from config and shared by every entry point.
#[derive(Clone)]
pub struct BridgeComponents {
    pub tracker: Arc<GitHubClient>,
    pub platform: Arc<RestPlatform>,
}

impl BridgeComponents {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            tracker: Arc::new(GitHubClient::new(&config.github_api_url)),
            platform: Arc::new(RestPlatform::new(
                &config.platform_url,
                config.platform_token.clone(),
            )),
        }
    }
}

fn start(config: &BridgeConfig) -> Result<BridgeComponents> {
    config.validate()?;
    init_tracing(&config.log_file)?;
    Ok(BridgeComponents::from_config(config))
}

/// Builds the tile refresher (with its webhook strategy set) from components.
pub fn build_tile_refresher(
    config: &BridgeConfig,
    components: &BridgeComponents,
) -> Result<TileRefresher> {
    let tracker: Arc<dyn IssueTracker> = components.tracker.clone();
    let strategies = webhook_strategy_set(tracker.clone()).build()?;
    Ok(TileRefresher::new(
        tracker,
        components.platform.clone(),
        strategies,
        &config.webhook_callback_url,
    )
    .with_issues_limit(config.recent_issues_limit)
    .with_interval(config.tile_refresh_interval()))
}

/// Main entry: init logging, validate config, set up every place, refresh tiles until Ctrl-C,
/// then remove the webhooks.
#[instrument(skip(config, places))]
pub async fn run_bridge(config: BridgeConfig, places: Vec<LinkedPlace>) -> Result<()> {
    let components = start(&config)?;
    info!(
        github_api_url = %config.github_api_url,
        platform_url = %config.platform_url,
        places = places.len(),
        "Initializing bridge"
    );

    let refresher = build_tile_refresher(&config, &components)?;
    info!("Bridge started successfully");

    refresher
        .run(&places, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await;

    info!("Bridge stopped");
    Ok(())
}

/// Relays one `issues` webhook delivery to every place linked to `owner/repo`.
pub async fn relay_issue_event(
    config: BridgeConfig,
    places: Vec<LinkedPlace>,
    owner: &str,
    repo: &str,
    event: IssuesEvent,
) -> Result<()> {
    let components = start(&config)?;
    let relay = IssueRelay::new(components.platform.clone());
    let created = relay.relay_to_linked(&places, owner, repo, &event).await?;
    info!(
        issue = event.issue.number,
        action = %event.action,
        discussions = created,
        "Issue event handled"
    );
    Ok(())
}

/// Relays one `issue_comment` webhook delivery to the discussions of every place linked to
/// `owner/repo`.
pub async fn relay_issue_comment_event(
    config: BridgeConfig,
    places: Vec<LinkedPlace>,
    owner: &str,
    repo: &str,
    event: IssueCommentEvent,
) -> Result<()> {
    let components = start(&config)?;
    let relay = IssueCommentRelay::new(components.platform.clone(), components.platform.clone());
    let created = relay.relay_to_linked(&places, owner, repo, &event).await?;
    info!(
        issue = event.issue.number,
        action = %event.action,
        replies = created,
        "Issue comment event handled"
    );
    Ok(())
}

/// Mirrors one platform comment event to the tracker issue of its discussion.
pub async fn mirror_comment_event(
    config: BridgeConfig,
    places: Vec<LinkedPlace>,
    event: CommentEvent,
) -> Result<MirrorOutcome> {
    let components = start(&config)?;
    let place = places
        .iter()
        .find(|p| p.place_url == event.place_url)
        .ok_or_else(|| anyhow::anyhow!("Place {} is not linked", event.place_url))?;

    let mirror = CommentMirror::new(
        components.tracker.clone(),
        components.platform.clone(),
        &config.platform_url,
    );
    let outcome = mirror.mirror(place, &event).await?;
    info!(?outcome, "Comment event handled");
    Ok(outcome)
}
