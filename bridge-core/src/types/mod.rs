//! Core types: event tokens and their keys, place options, the strategy trait, failure logging.

mod failure_log;
mod options;
mod strategy;
mod token;

pub use failure_log::{FailureLog, Phase, TracingFailureLog};
pub use options::{PlaceOptions, PlaceTarget};
pub use strategy::Strategy;
pub use token::{EventToken, TokenKey};
