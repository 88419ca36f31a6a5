//! Options passed to strategy setup/teardown.

use super::token::EventToken;

/// Options record for one target place. Applications add whatever fields their strategies need;
/// the strategy set only reads the place URL and injects the stored token before teardown.
pub trait PlaceOptions: Send + Sync {
    /// URL of the place the strategies are registered for. Part of the token key.
    fn place_url(&self) -> &str;
    /// Token injected by the strategy set before a teardown call.
    fn event_token(&self) -> Option<&EventToken>;
    fn set_event_token(&mut self, token: Option<EventToken>);
}

/// Minimal options: a place URL and the injected token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceTarget {
    pub place_url: String,
    pub event_token: Option<EventToken>,
}

impl PlaceTarget {
    pub fn new(place_url: impl Into<String>) -> Self {
        Self {
            place_url: place_url.into(),
            event_token: None,
        }
    }
}

impl PlaceOptions for PlaceTarget {
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
