//! Strategy trait: registration and deregistration of one kind of external event subscription.

use async_trait::async_trait;

use super::options::PlaceOptions;
use super::token::EventToken;

/// One kind of event registration (e.g. issue events, issue comment events) against the tracker.
///
/// `setup` returns the token that `teardown` later needs; the strategy set stores it between the
/// two calls and injects it into the options before teardown.
#[async_trait]
pub trait Strategy<O: PlaceOptions>: Send + Sync {
    /// Stable name; part of the token key, so it must not change between setup and teardown.
    fn name(&self) -> &str;

    async fn setup(&self, options: &O) -> anyhow::Result<EventToken>;

    /// `options.event_token()` holds the token from setup, or `None` if none was stored.
    async fn teardown(&self, options: &O) -> anyhow::Result<()>;
}
