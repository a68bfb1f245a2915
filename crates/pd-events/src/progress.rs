//! Run Progress Types
//!
//! Progress records reported while a queue of runs is worked through.

use serde::{Deserialize, Serialize};

use crate::WorldParams;

/// Progress of one queued run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunProgress {
    pub run_id: usize,
    pub params: WorldParams,
    pub epoch: usize,
    pub num_coop: usize,
    pub num_defect: usize,
    /// True once the run has consumed its epoch budget
    #[serde(default)]
    pub finished: bool,
}

impl RunProgress {
    /// Fraction of the population cooperating, 0.0 for an empty population.
    pub fn coop_fraction(&self) -> f64 {
        let total = self.num_coop + self.num_defect;
        if total == 0 {
            0.0
        } else {
            self.num_coop as f64 / total as f64
        }
    }
}

/// Final report over every completed run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub runs: Vec<RunProgress>,
}

impl RunSummary {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            runs: Vec::new(),
        }
    }

    /// Mean cooperator fraction across finished runs.
    pub fn mean_coop_fraction(&self) -> Option<f64> {
        if self.runs.is_empty() {
            return None;
        }
        let sum: f64 = self.runs.iter().map(RunProgress::coop_fraction).sum();
        Some(sum / self.runs.len() as f64)
    }
}
