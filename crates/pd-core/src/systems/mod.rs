//! Simulation Systems
//!
//! Neighbor graph construction, fitness evaluation and reproduction.

pub mod fitness;
pub mod graph;
pub mod reproduction;

// Re-export commonly used systems
pub use fitness::{calc_fitness, refresh_all_fitness, refresh_neighborhood};
pub use graph::{build_neighbor_graph, distance_sqr, torus_axis_distance};
pub use reproduction::{reproduce, select_source, ReproOutcome};
