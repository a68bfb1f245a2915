//! Shared data types and serialization for the spatial Prisoner's Dilemma.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine produces these records; anything that renders or archives a
//! run consumes them.

pub mod histogram;
pub mod params;
pub mod progress;
pub mod snapshot;

// Re-export parameter types
pub use params::{ParseWrapModeError, WorldParams, WrapMode};

// Re-export histogram types
pub use histogram::{DegreeHistogram, HISTOGRAM_HEADER};

// Re-export progress types
pub use progress::{RunProgress, RunSummary};

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, AgentSnapshot, PopulationSnapshot};
