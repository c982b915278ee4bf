//! Integration and property tests for the interaction/possession core.
//!
//! - `integration.rs`: end-to-end player scenarios driven through
//!   [`FirstPersonController::tick`](crate::controller::FirstPersonController::tick)
//! - `properties.rs`: `proptest` properties for prompt, possession and look
//! - `helpers.rs`: world and player setup

mod helpers;
mod integration;

pub use helpers::*;
