//! Snapshot Types
//!
//! Serialization structs for population snapshots.
//!
//! A snapshot captures every agent's position, strategy and fitness at one
//! epoch, in stable index order, for rendering and offline analysis.

use serde::{Deserialize, Serialize};

use crate::WorldParams;

/// Generates a snapshot ID for a run at an epoch.
pub fn generate_snapshot_id(run_id: usize, epoch: usize) -> String {
    format!("run_{:04}_epoch_{:06}", run_id, epoch)
}

/// One agent's observable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub coop: bool,
    pub fitness: f64,
    /// Number of neighbors
    pub degree: usize,
}

/// Complete population state at one epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub snapshot_id: String,
    pub run_id: usize,
    pub epoch: usize,
    pub params: WorldParams,
    pub num_coop: usize,
    pub num_defect: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<AgentSnapshot>,
}
