//! Component Definitions
//!
//! Plain data held by the population engine.

pub mod agent;
pub mod payoff;

pub use agent::*;
pub use payoff::*;
