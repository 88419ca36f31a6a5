//! Mirrors platform comments onto the linked tracker issue.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::LinkedPlace;
use crate::github::IssueTracker;
use crate::platform::{
    CommentEvent, PlatformDirectory, PlatformUser, FROM_TRACKER_PROP, ISSUE_NUMBER_PROP,
};

/// First line of every mirrored comment; lets the tracker side recognise its own echoes.
pub const COMMENT_MARKER: &str = "<!--tracker-bridge-->";

/// What [`CommentMirror::mirror`] did with a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorOutcome {
    Posted { issue_number: u64 },
    /// The comment was itself created from tracker activity.
    FromTracker,
    /// The discussion is not linked to an issue.
    NotLinked,
}

/// `<marker>\n[[Platform](platform_url) - [Name](profile)] text`
pub fn format_tracker_comment(platform_url: &str, author: &PlatformUser, text: &str) -> String {
    format!(
        "{}\n[[Platform]({}) - [{}]({})] {}",
        COMMENT_MARKER, platform_url, author.display_name, author.profile_url, text
    )
}

fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty() && s != "false",
        Some(_) => true,
    }
}

fn issue_number(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Posts platform comments to the tracker issue their discussion is linked to.
pub struct CommentMirror {
    tracker: Arc<dyn IssueTracker>,
    directory: Arc<dyn PlatformDirectory>,
    platform_url: String,
}

impl CommentMirror {
    pub fn new(
        tracker: Arc<dyn IssueTracker>,
        directory: Arc<dyn PlatformDirectory>,
        platform_url: impl Into<String>,
    ) -> Self {
        Self {
            tracker,
            directory,
            platform_url: platform_url.into(),
        }
    }

    #[instrument(skip(self, place, event), fields(comment_url = %event.comment_url))]
    pub async fn mirror(
        &self,
        place: &LinkedPlace,
        event: &CommentEvent,
    ) -> anyhow::Result<MirrorOutcome> {
        let comment_props = self.directory.ext_props(&event.comment_url).await?;
        if is_set(comment_props.get(FROM_TRACKER_PROP)) {
            debug!("Comment came from the tracker, not mirroring");
            return Ok(MirrorOutcome::FromTracker);
        }

        let discussion_props = self.directory.ext_props(&event.discussion_url).await?;
        let Some(issue_number) = issue_number(discussion_props.get(ISSUE_NUMBER_PROP)) else {
            debug!(discussion_url = %event.discussion_url, "Discussion not linked to an issue");
            return Ok(MirrorOutcome::NotLinked);
        };

        let author = self.directory.person(&event.author_id).await?;
        let body = format_tracker_comment(&self.platform_url, &author, &event.summary);
        self.tracker
            .add_comment(&place.repo_ref(), issue_number, &body, &place.access_token)
            .await?;

        info!(issue_number, repo = %place.repo_ref(), "step: comment mirrored");
        Ok(MirrorOutcome::Posted { issue_number })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_tracker_comment() {
        let author = PlatformUser {
            display_name: "Ada".to_string(),
            profile_url: "https://community.example.com/people/ada".to_string(),
        };
        let body = format_tracker_comment("https://community.example.com", &author, "Looks good");
        assert_eq!(
            body,
            "<!--tracker-bridge-->\n[[Platform](https://community.example.com) - \
             [Ada](https://community.example.com/people/ada)] Looks good"
        );
    }

    #[test]
    fn test_issue_number_accepts_numbers_and_strings() {
        assert_eq!(issue_number(Some(&json!(12))), Some(12));
        assert_eq!(issue_number(Some(&json!("12"))), Some(12));
        assert_eq!(issue_number(Some(&json!(""))), None);
        assert_eq!(issue_number(None), None);
    }

    #[test]
    fn test_is_set() {
        assert!(is_set(Some(&json!(true))));
        assert!(is_set(Some(&json!("true"))));
        assert!(!is_set(Some(&json!(false))));
        assert!(!is_set(Some(&json!("false"))));
        assert!(!is_set(None));
    }
}
