//! Bridge configuration: env settings ([`BridgeConfig`]) and the linked places file.

mod base;
mod places;

#[cfg(test)]
mod tests;

pub use base::BridgeConfig;
pub use places::{load_places, LinkedPlace};
