//! Checks shared by construction from a source record and by `build`.

use bridge_core::ContentError;
use serde_json::Value;

use crate::content::{Content, COMMENT, MESSAGE};

/// First path segment a parent URI may start with.
pub const PARENT_ROOTS: [&str; 3] = ["places", "contents", "people"];

/// Type present, subject present unless the type allows none, body text present.
pub(crate) fn verify(content: &Content) -> Result<(), ContentError> {
    let content_type = content
        .content_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(ContentError::MissingType)?;
    if content.subject.is_none() && content_type != COMMENT && content_type != MESSAGE {
        return Err(ContentError::MissingSubject);
    }
    if content.content.text.is_none() {
        return Err(ContentError::MissingBody);
    }
    Ok(())
}

/// `/root/...` with no whitespace and `root` in [`PARENT_ROOTS`].
pub(crate) fn check_parent(uri: &str) -> Result<(), ContentError> {
    if uri.is_empty() {
        return Err(ContentError::MissingParent);
    }
    let path = uri.strip_prefix('/').ok_or(ContentError::InvalidParent)?;
    if uri.chars().any(char::is_whitespace) {
        return Err(ContentError::InvalidParent);
    }
    let root = path.split('/').next().unwrap_or_default();
    if !PARENT_ROOTS.contains(&root) {
        return Err(ContentError::InvalidParent);
    }
    Ok(())
}

/// Loose truthiness: null, false, zero, NaN and "" are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
