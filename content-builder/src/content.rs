//! Content payload record, serialized with the platform's field names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DISCUSSION: &str = "discussion";
pub const MESSAGE: &str = "message";
pub const COMMENT: &str = "comment";

/// MIME type of a fresh body.
pub const DEFAULT_BODY_TYPE: &str = "text/html";

/// Who can see the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    All,
    Place,
    People,
}

/// Body of the content: MIME type and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(rename = "type", default = "default_body_type")]
    pub mime_type: String,
    /// Kept as a raw value: falsy non-strings (`0`, `false`, `""`) are accepted by the builder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
}

fn default_body_type() -> String {
    DEFAULT_BODY_TYPE.to_string()
}

impl Default for Body {
    fn default() -> Self {
        Self {
            mime_type: default_body_type(),
            text: None,
        }
    }
}

/// Author attribution for content posted by a service account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnBehalfOf {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A content payload as submitted to the platform content API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub content: Body,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<OnBehalfOf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
}

impl Content {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
