//! Output Module
//!
//! Population statistics and JSON snapshot output.

pub mod snapshot;
pub mod stats;

pub use snapshot::*;
pub use stats::*;
