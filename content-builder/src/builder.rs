//! Chainable content builder.

use std::fmt::Display;

use bridge_core::ContentError;
use serde_json::Value;
use tracing::debug;

use crate::content::{Content, OnBehalfOf, Visibility, DISCUSSION, MESSAGE};
use crate::validate::{check_parent, is_truthy, verify};

/// Builder for a [`Content`] payload.
///
/// Setters return the builder so calls chain; fallible setters return it inside a `Result` and
/// fail without touching the payload. `build` re-checks the rules that span several fields.
///
/// ```
/// use content_builder::ContentBuilder;
///
/// let mut builder = ContentBuilder::new();
/// builder.discussion().subject("Release 1.2").body("<p>Notes</p>")?.parent_place(42)?;
/// let content = builder.build()?;
/// assert_eq!(content.parent.as_deref(), Some("/places/42"));
/// # Ok::<(), content_builder::ContentError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentBuilder {
    content: Content,
}

impl ContentBuilder {
    /// Creates a builder with an empty payload (body type `text/html`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing record, which must already pass the build checks.
    pub fn from_source(source: Content) -> Result<Self, ContentError> {
        verify(&source)?;
        Ok(Self { content: source })
    }

    /// Parses a JSON record and starts from it.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let source: Content = serde_json::from_str(json)?;
        Ok(Self::from_source(source)?)
    }

    /// Checks the payload and returns it.
    pub fn build(&self) -> Result<&Content, ContentError> {
        verify(&self.content)?;
        debug!(
            content_type = ?self.content.content_type,
            parent = ?self.content.parent,
            "Content built"
        );
        Ok(&self.content)
    }

    /// Checks the payload, hands a copy to `on_build`, and returns the builder so similar
    /// payloads can be built by changing a few fields.
    pub fn build_with<F>(&mut self, on_build: F) -> Result<&mut Self, ContentError>
    where
        F: FnOnce(Content),
    {
        verify(&self.content)?;
        on_build(self.content.clone());
        Ok(self)
    }

    /// Discards every change.
    pub fn reset(&mut self) -> &mut Self {
        self.content = Content::default();
        self
    }

    pub fn discussion(&mut self) -> &mut Self {
        self.content.content_type = Some(DISCUSSION.to_string());
        self
    }

    pub fn message(&mut self) -> &mut Self {
        self.content.content_type = Some(MESSAGE.to_string());
        self
    }

    /// Subject line; not required for comments and messages.
    pub fn subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.content.subject = Some(subject.into());
        self
    }

    /// Body text. Any truthy value must be a string; falsy values (`""`, `0`, `false`, null)
    /// are stored as given, and null clears the text.
    pub fn body(&mut self, body: impl Into<Value>) -> Result<&mut Self, ContentError> {
        let body = body.into();
        if is_truthy(&body) && !body.is_string() {
            return Err(ContentError::InvalidBody);
        }
        self.content.content.text = match body {
            Value::Null => None,
            other => Some(other),
        };
        Ok(self)
    }

    /// MIME type of the body; defaults to `text/html`.
    pub fn body_type(&mut self, mime_type: &str) -> Result<&mut Self, ContentError> {
        if mime_type.is_empty() {
            return Err(ContentError::InvalidBodyType);
        }
        self.content.content.mime_type = mime_type.to_string();
        Ok(self)
    }

    /// Parent URI, e.g. `/places/1001` or `/contents/42`. External references are not resolved.
    pub fn parent(&mut self, parent_uri: &str) -> Result<&mut Self, ContentError> {
        check_parent(parent_uri)?;
        self.content.parent = Some(parent_uri.to_string());
        Ok(self)
    }

    pub fn parent_content(&mut self, content_id: impl Display) -> Result<&mut Self, ContentError> {
        self.parent(&format!("/contents/{}", content_id))
    }

    pub fn parent_place(&mut self, place_id: impl Display) -> Result<&mut Self, ContentError> {
        self.parent(&format!("/places/{}", place_id))
    }

    /// Restricts visibility to the given place, which also becomes the parent.
    pub fn place(&mut self, place_uri: &str) -> Result<&mut Self, ContentError> {
        if place_uri.is_empty() {
            return Err(ContentError::MissingParent);
        }
        self.parent(place_uri)?;
        self.content.visibility = Some(Visibility::Place);
        Ok(self)
    }

    /// Visible to everyone (the platform default).
    pub fn all(&mut self) -> &mut Self {
        self.content.visibility = Some(Visibility::All);
        self
    }

    /// Attributes the content to someone else. Only discussions and messages support it.
    pub fn on_behalf_of(
        &mut self,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<&mut Self, ContentError> {
        match self.content.content_type.as_deref() {
            Some(DISCUSSION) | Some(MESSAGE) => {}
            _ => return Err(ContentError::InvalidType),
        }
        let non_empty = |s: Option<&str>| s.filter(|s| !s.is_empty()).map(str::to_string);
        self.content.on_behalf_of = Some(OnBehalfOf {
            email: non_empty(email),
            name: non_empty(name),
        });
        Ok(self)
    }

    /// Tag list. Null becomes an empty list; anything else must be an array whose first
    /// element is a string.
    pub fn tags(&mut self, tags: impl Into<Value>) -> Result<&mut Self, ContentError> {
        let tags = match tags.into() {
            Value::Null => Vec::new(),
            Value::Array(items) => {
                if items.first().is_some_and(|first| !first.is_string()) {
                    return Err(ContentError::InvalidTags);
                }
                items
            }
            _ => return Err(ContentError::InvalidTags),
        };
        self.content.tags = Some(tags);
        Ok(self)
    }
}

impl TryFrom<Content> for ContentBuilder {
    type Error = ContentError;

    fn try_from(source: Content) -> Result<Self, Self::Error> {
        Self::from_source(source)
    }
}
