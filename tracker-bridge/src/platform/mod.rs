//! Collaboration platform access: pushing tiles, creating content, and the lookups comment
//! mirroring needs.

mod rest;

use async_trait::async_trait;
use content_builder::Content;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use rest::RestPlatform;

/// Extended property set on comments created from tracker activity.
pub const FROM_TRACKER_PROP: &str = "fromGitHub";
/// Extended property linking a discussion to its tracker issue number.
pub const ISSUE_NUMBER_PROP: &str = "githubIssueNumber";

/// API URL of an entity returned by the platform (`resources.self.ref`).
pub fn self_ref(entity: &Value) -> Option<&str> {
    entity
        .get("resources")?
        .get("self")?
        .get("ref")?
        .as_str()
}

/// Display data of a platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformUser {
    pub display_name: String,
    pub profile_url: String,
}

/// A comment posted on the platform, as delivered by the platform's webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentEvent {
    pub place_url: String,
    pub comment_url: String,
    pub discussion_url: String,
    pub author_id: String,
    pub summary: String,
}

/// Outgoing platform writes.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Pushes a data payload to a tile instance.
    async fn push_tile(&self, tile_url: &str, data: &Value) -> anyhow::Result<()>;

    /// Creates content and returns the platform's representation of it.
    async fn create_content(&self, content: &Content) -> anyhow::Result<Value>;

    /// Stores extended properties on a content object.
    async fn set_ext_props(
        &self,
        object_url: &str,
        props: &Map<String, Value>,
    ) -> anyhow::Result<()>;
}

/// Platform reads used to route a comment to the tracker.
#[async_trait]
pub trait PlatformDirectory: Send + Sync {
    /// Extended properties of a content object (comment, discussion).
    async fn ext_props(&self, object_url: &str) -> anyhow::Result<Map<String, Value>>;

    async fn person(&self, person_id: &str) -> anyhow::Result<PlatformUser>;

    /// URL of the discussion relayed for `issue_number` in the place, if any.
    async fn find_discussion(
        &self,
        place_url: &str,
        issue_number: u64,
    ) -> anyhow::Result<Option<String>>;
}
