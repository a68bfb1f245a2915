//! Spatial Prisoner's Dilemma engine.
//!
//! Agents sit on the unit torus, link to every other agent within radius `r`,
//! and score one round of the Prisoner's Dilemma against each neighbor.
//! Strategies spread by fitness-proportional imitation, one random agent at
//! a time, `N` updates per epoch.

pub mod batch;
pub mod components;
pub mod config;
pub mod output;
pub mod queue;
pub mod systems;
pub mod world;

pub use batch::run_queue;
pub use components::*;
pub use config::{default_config_toml, ConfigError, SimConfig};
pub use output::{OutputError, PopulationStats, SnapshotSchedule};
pub use queue::{RunInfo, RunQueue};
pub use systems::ReproOutcome;
pub use world::{World, DEFAULT_NUM_RUNS, RUN_UNBOUNDED};
