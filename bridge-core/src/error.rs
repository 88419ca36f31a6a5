//! Error types for the bridge.
//!
//! [`ContentError`] covers payload construction and [`StrategySetError`] the strategy set
//! builder. Application code wraps both in `anyhow`.

use thiserror::Error;

/// Rejections raised by the content builder. Each one means the calling code tried to
/// assemble a payload the platform would refuse.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentError {
    #[error("Missing type")]
    MissingType,

    #[error("Missing subject")]
    MissingSubject,

    #[error("Missing content text")]
    MissingBody,

    #[error("Invalid content type")]
    InvalidBodyType,

    /// Reserved for people-scoped visibility; no setter raises it yet.
    #[error("Missing user list")]
    MissingUsers,

    #[error("Missing parent URI")]
    MissingParent,

    #[error("Parent URI is not in a correct format")]
    InvalidParent,

    #[error("Invalid type")]
    InvalidType,

    #[error("Invalid tags")]
    InvalidTags,

    #[error("Invalid body: it must be a string")]
    InvalidBody,
}

impl ContentError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentError::MissingType => "MISSING_TYPE",
            ContentError::MissingSubject => "MISSING_SUBJECT",
            ContentError::MissingBody => "MISSING_BODY",
            ContentError::InvalidBodyType => "INVALID_BODY_TYPE",
            ContentError::MissingUsers => "MISSING_USERS",
            ContentError::MissingParent => "MISSING_PARENT",
            ContentError::InvalidParent => "INVALID_PARENT",
            ContentError::InvalidType => "INVALID_TYPE",
            ContentError::InvalidTags => "INVALID_TAGS",
            ContentError::InvalidBody => "INVALID_BODY",
        }
    }
}

/// Errors raised synchronously by the strategy set builder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategySetError {
    #[error("Cannot build an empty strategy set.")]
    EmptySet,
}

impl StrategySetError {
    pub fn kind(&self) -> &'static str {
        match self {
            StrategySetError::EmptySet => "EMPTY_SET",
        }
    }
}
