//! # bridge-core
//!
//! Core types and traits shared by the tracker bridge crates: the [`Strategy`] capability,
//! [`PlaceOptions`], opaque [`EventToken`]s and their [`TokenKey`], the [`FailureLog`] sink used
//! when a strategy fails, the error taxonomy, and tracing initialization.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{ContentError, StrategySetError};
pub use logger::init_tracing;
pub use types::{
    EventToken, FailureLog, Phase, PlaceOptions, PlaceTarget, Strategy, TokenKey,
    TracingFailureLog,
};
