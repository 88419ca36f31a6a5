//! Event tokens returned by strategy setup, and the key they are stored under.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Opaque handle returned by a strategy's setup and handed back to its teardown.
/// Nothing but the issuing strategy interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventToken(Value);

impl EventToken {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// Serializes any value into a token.
    pub fn from_serialize<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).map(Self)
    }

    /// Decodes the token back into the type the strategy stored.
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.0)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for EventToken {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Key of a token in a pool: `{place_url}_{strategy_name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey(String);

impl TokenKey {
    pub fn new(place_url: &str, strategy_name: &str) -> Self {
        Self(format!("{}_{}", place_url, strategy_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TokenKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
