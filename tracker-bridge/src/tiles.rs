//! Recent-issues tile: pushes the open issues of each linked repository to its tile instance,
//! and manages the place's webhooks over the instance lifecycle.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use strategy_set::StrategySet;
use tracing::{debug, error, info, instrument, warn};

use crate::config::LinkedPlace;
use crate::github::{Issue, IssueTracker, RepoRef};
use crate::platform::Platform;
use crate::strategies::PlaceSetup;

/// Tile definition name handled here.
pub const RECENT_ISSUES_TILE: &str = "github-issues-recent";

/// List tile payload for `issues`.
pub fn issues_tile(repo: &RepoRef, issues: &[Issue]) -> Value {
    let contents: Vec<Value> = issues
        .iter()
        .map(|issue| {
            json!({
                "text": format!("#{} {}", issue.number, issue.title),
                "linkDescription": format!("Open #{} on GitHub", issue.number),
                "action": { "url": issue.html_url },
            })
        })
        .collect();
    json!({
        "title": format!("Recent issues: {}", repo),
        "contents": contents,
    })
}

/// Drives the recent-issues tile for a set of linked places.
pub struct TileRefresher {
    tracker: Arc<dyn IssueTracker>,
    platform: Arc<dyn Platform>,
    strategies: StrategySet<PlaceSetup>,
    callback_url: String,
    issues_limit: usize,
    interval: Duration,
}

impl TileRefresher {
    pub fn new(
        tracker: Arc<dyn IssueTracker>,
        platform: Arc<dyn Platform>,
        strategies: StrategySet<PlaceSetup>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            tracker,
            platform,
            strategies,
            callback_url: callback_url.into(),
            issues_limit: 10,
            interval: Duration::from_secs(60),
        }
    }

    pub fn with_issues_limit(mut self, limit: usize) -> Self {
        self.issues_limit = limit;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn strategies(&self) -> &StrategySet<PlaceSetup> {
        &self.strategies
    }

    /// Fetches the recent issues of the place's repository and pushes them to its tile.
    #[instrument(skip(self, place), fields(place_url = %place.place_url, repo = %place.repo_ref()))]
    pub async fn process_instance(&self, place: &LinkedPlace) -> anyhow::Result<()> {
        let repo = place.repo_ref();
        let issues = self
            .tracker
            .recent_issues(&repo, self.issues_limit, &place.access_token)
            .await?;
        let data = issues_tile(&repo, &issues);
        self.platform.push_tile(&place.tile_url, &data).await?;
        info!(count = issues.len(), "step: issues tile pushed");
        Ok(())
    }

    /// New or updated tile instance: register the place's webhooks, then push right away.
    /// Instances of other tiles are ignored.
    pub async fn on_instance(&self, place: &LinkedPlace) -> anyhow::Result<()> {
        if place.tile_name != RECENT_ISSUES_TILE {
            debug!(tile_name = %place.tile_name, "Ignoring instance of another tile");
            return Ok(());
        }
        self.strategies
            .setup(&PlaceSetup::new(place, &self.callback_url))
            .await;
        self.process_instance(place).await
    }

    /// Removes the place's webhooks.
    pub async fn remove_instance(&self, place: &LinkedPlace) {
        let mut options = PlaceSetup::new(place, &self.callback_url);
        self.strategies.teardown(&mut options).await;
    }

    /// Pushes every instance once.
    pub async fn push_all(&self, places: &[LinkedPlace]) {
        for place in places.iter().filter(|p| p.tile_name == RECENT_ISSUES_TILE) {
            if let Err(e) = self.process_instance(place).await {
                error!(error = %e, place_url = %place.place_url, "Tile push failed");
            }
        }
    }

    /// Sets up every instance, pushes all of them each interval until `shutdown` resolves,
    /// then removes the webhooks of every instance.
    pub async fn run<F>(&self, places: &[LinkedPlace], shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(places = places.len(), interval_secs = self.interval.as_secs(), "step: tile refresher started");

        for place in places {
            if let Err(e) = self.on_instance(place).await {
                warn!(error = %e, place_url = %place.place_url, "Instance bootstrap failed");
            }
        }

        let mut ticker = tokio::time::interval(self.interval);
        // The first tick completes immediately; bootstrap already pushed.
        ticker.tick().await;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => self.push_all(places).await,
            }
        }

        info!("step: tile refresher stopping, removing webhooks");
        for place in places.iter().filter(|p| p.tile_name == RECENT_ISSUES_TILE) {
            self.remove_instance(place).await;
        }
    }
}
