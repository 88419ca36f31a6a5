//! A built strategy set: sequential setup/teardown bound to a private token pool.

use std::sync::Arc;

use bridge_core::{FailureLog, Phase, PlaceOptions, Strategy, TokenKey};
use tracing::{debug, info, instrument};

use crate::token_pool::TokenPool;

/// Strategies compiled by [`crate::StrategySetBuilder::build`].
///
/// `setup` and `teardown` await each strategy before starting the next, so only one pool
/// mutation is in flight per call. Overlapping calls for the same place are not serialized
/// against each other; callers that need that must serialize per place themselves.
pub struct StrategySet<O: PlaceOptions + 'static> {
    strategies: Vec<Arc<dyn Strategy<O>>>,
    tokens: TokenPool,
    failure_log: Arc<dyn FailureLog>,
}

impl<O: PlaceOptions + 'static> StrategySet<O> {
    pub(crate) fn new(strategies: Vec<Arc<dyn Strategy<O>>>, failure_log: Arc<dyn FailureLog>) -> Self {
        Self {
            strategies,
            tokens: TokenPool::new(),
            failure_log,
        }
    }

    /// Runs every strategy's setup in insertion order and stores each returned token.
    /// A failing strategy is reported to the failure log and skipped.
    #[instrument(
        skip(self, options),
        fields(place_url = %options.place_url(), strategy_count = self.strategies.len())
    )]
    pub async fn setup(&self, options: &O) {
        info!("step: strategy set setup started");

        for strategy in &self.strategies {
            let name = strategy.name();
            info!(strategy = %name, "step: strategy setup");
            match strategy.setup(options).await {
                Ok(token) => {
                    let key = TokenKey::new(options.place_url(), name);
                    debug!(key = %key, "Storing event token");
                    self.tokens.add_token(key, token).await;
                    info!(strategy = %name, "step: strategy setup done");
                }
                Err(e) => {
                    self.failure_log
                        .strategy_failed(name, Phase::Setup, options.place_url(), &e);
                }
            }
        }

        info!("step: strategy set setup finished");
    }

    /// Runs every strategy's teardown in insertion order (not reversed). Before each call the
    /// stored token, or `None`, is injected into `options`; it is removed from the pool once the
    /// teardown succeeds. A failing strategy is reported and skipped, and its token kept.
    #[instrument(
        skip(self, options),
        fields(place_url = %options.place_url(), strategy_count = self.strategies.len())
    )]
    pub async fn teardown(&self, options: &mut O) {
        info!("step: strategy set teardown started");

        for strategy in &self.strategies {
            let name = strategy.name();
            let key = TokenKey::new(options.place_url(), name);
            let token = self.tokens.get_by_key(&key).await;
            info!(strategy = %name, has_token = token.is_some(), "step: strategy teardown");
            options.set_event_token(token);

            match strategy.teardown(options).await {
                Ok(()) => {
                    self.tokens.remove_token_by_key(&key).await;
                    info!(strategy = %name, "step: strategy teardown done");
                }
                Err(e) => {
                    self.failure_log
                        .strategy_failed(name, Phase::Teardown, options.place_url(), &e);
                }
            }
        }

        info!("step: strategy set teardown finished");
    }

    /// The token pool owned by this set.
    pub fn token_pool(&self) -> &TokenPool {
        &self.tokens
    }

    /// Strategy names in execution order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
