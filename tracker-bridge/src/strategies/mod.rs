//! Webhook strategies registered for each linked place, and the options they receive.

mod webhook;

use std::sync::Arc;

use bridge_core::{EventToken, PlaceOptions};
use strategy_set::StrategySetBuilder;

use crate::config::LinkedPlace;
use crate::github::{IssueTracker, RepoRef};

pub use webhook::{IssueCommentStrategy, IssueStrategy};

/// Options for one linked place: where the hooks go and which credentials to use.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSetup {
    pub place_url: String,
    pub repo: RepoRef,
    pub access_token: String,
    pub callback_url: String,
    pub event_token: Option<EventToken>,
}

impl PlaceSetup {
    pub fn new(place: &LinkedPlace, callback_url: impl Into<String>) -> Self {
        Self {
            place_url: place.place_url.clone(),
            repo: place.repo_ref(),
            access_token: place.access_token.clone(),
            callback_url: callback_url.into(),
            event_token: None,
        }
    }
}

impl PlaceOptions for PlaceSetup {
    fn place_url(&self) -> &str {
        &self.place_url
    }

    fn event_token(&self) -> Option<&EventToken> {
        self.event_token.as_ref()
    }

    fn set_event_token(&mut self, token: Option<EventToken>) {
        self.event_token = token;
    }
}

/// Builder holding the issue strategy followed by the issue comment strategy.
pub fn webhook_strategy_set(tracker: Arc<dyn IssueTracker>) -> StrategySetBuilder<PlaceSetup> {
    let mut builder = StrategySetBuilder::<PlaceSetup>::new();
    builder
        .add_strategy(Arc::new(IssueStrategy::new(tracker.clone())))
        .add_strategy(Arc::new(IssueCommentStrategy::new(tracker)));
    builder
}
