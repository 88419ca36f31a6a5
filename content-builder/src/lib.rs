//! # Content builder
//!
//! Assembles platform content payloads (discussions, messages) and refuses to hand out one the
//! platform would reject. Checks run per setter where a single field is enough to decide, and
//! again on every `build`, where fields depend on each other.
//!
//! The builder does no I/O; the built [`Content`] is serialized and posted by the caller.

mod builder;
mod content;
mod validate;

pub use bridge_core::ContentError;
pub use builder::ContentBuilder;
pub use content::{
    Body, Content, OnBehalfOf, Visibility, COMMENT, DEFAULT_BODY_TYPE, DISCUSSION, MESSAGE,
};
pub use validate::PARENT_ROOTS;
