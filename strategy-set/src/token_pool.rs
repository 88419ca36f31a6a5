//! In-memory store of event tokens for one built strategy set.

use std::collections::HashMap;

use bridge_core::{EventToken, TokenKey};
use tokio::sync::RwLock;
use tracing::debug;

type TokenMap = HashMap<TokenKey, EventToken>;

/// Maps `{place_url}_{strategy_name}` to the token the strategy's setup returned.
/// One pool per built set; never shared between builds.
#[derive(Debug, Default)]
pub struct TokenPool {
    tokens: RwLock<TokenMap>,
}

impl TokenPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the token, replacing any previous token under the same key.
    pub async fn add_token(&self, key: TokenKey, token: EventToken) {
        let mut tokens = self.tokens.write().await;
        if tokens.insert(key.clone(), token).is_some() {
            debug!(key = %key, "Replaced existing event token");
        }
    }

    pub async fn get_by_key(&self, key: &TokenKey) -> Option<EventToken> {
        let tokens = self.tokens.read().await;
        tokens.get(key).cloned()
    }

    /// Removes the token if present.
    pub async fn remove_token_by_key(&self, key: &TokenKey) {
        let mut tokens = self.tokens.write().await;
        tokens.remove(key);
    }

    pub async fn contains_key(&self, key: &TokenKey) -> bool {
        self.tokens.read().await.contains_key(key)
    }

    /// Keys currently held, sorted.
    pub async fn keys(&self) -> Vec<TokenKey> {
        let tokens = self.tokens.read().await;
        let mut keys: Vec<TokenKey> = tokens.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
