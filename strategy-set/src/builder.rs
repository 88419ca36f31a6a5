//! Builder collecting strategies in insertion order.

use std::sync::Arc;

use bridge_core::{FailureLog, PlaceOptions, Strategy, StrategySetError, TracingFailureLog};
use tracing::{debug, info};

use crate::set::StrategySet;

/// Ordered list of strategies; `build` compiles a snapshot of it into a [`StrategySet`].
///
/// The order strategies are added in is the order both `setup` and `teardown` run them.
pub struct StrategySetBuilder<O: PlaceOptions + 'static> {
    strategies: Vec<Arc<dyn Strategy<O>>>,
    failure_log: Arc<dyn FailureLog>,
}

impl<O: PlaceOptions + 'static> StrategySetBuilder<O> {
    /// Creates an empty builder that reports strategy failures through `tracing`.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            failure_log: Arc::new(TracingFailureLog),
        }
    }

    /// Replaces the sink that receives failures swallowed by sets built from here on.
    pub fn with_failure_log(mut self, failure_log: Arc<dyn FailureLog>) -> Self {
        self.failure_log = failure_log;
        self
    }

    /// Appends a strategy.
    pub fn add_strategy(&mut self, strategy: Arc<dyn Strategy<O>>) -> &mut Self {
        debug!(strategy = %strategy.name(), position = self.strategies.len(), "Adding strategy");
        self.strategies.push(strategy);
        self
    }

    /// Removes all strategies.
    pub fn reset(&mut self) -> &mut Self {
        self.strategies.clear();
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Compiles the current strategies into a set with a fresh token pool.
    /// Later changes to this builder do not affect the returned set.
    pub fn build(&self) -> Result<StrategySet<O>, StrategySetError> {
        if self.strategies.is_empty() {
            return Err(StrategySetError::EmptySet);
        }
        info!(strategy_count = self.strategies.len(), "Building strategy set");
        Ok(StrategySet::new(
            self.strategies.clone(),
            Arc::clone(&self.failure_log),
        ))
    }
}

impl<O: PlaceOptions + 'static> Default for StrategySetBuilder<O> {
    fn default() -> Self {
        Self::new()
    }
}
