//! # Strategy set
//!
//! Collects event strategies in order and compiles them into a [`StrategySet`] whose `setup` and
//! `teardown` run every strategy sequentially for one place. Each built set owns a private
//! [`TokenPool`] holding the token each strategy returned, keyed by place and strategy name.
//! A failing strategy is logged and skipped; the composite call never fails.

mod builder;
mod set;
mod token_pool;

pub use builder::StrategySetBuilder;
pub use set::StrategySet;
pub use token_pool::TokenPool;

// Integration tests live in tests/strategy_set_test.rs
