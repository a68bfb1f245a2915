//! Snapshot Output
//!
//! Captures a population as a `PopulationSnapshot` and writes snapshots and
//! run summaries as JSON files.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use pd_events::{generate_snapshot_id, AgentSnapshot, PopulationSnapshot, RunSummary};
use thiserror::Error;

use crate::world::World;

/// Summary file name inside the output directory
pub const SUMMARY_FILE: &str = "summary.json";

/// Errors that can occur during output operations.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decides which epochs get a snapshot within a run.
///
/// Every run is captured at epoch 0, at each multiple of the interval and at
/// its final epoch.
#[derive(Debug, Clone)]
pub struct SnapshotSchedule {
    interval: usize,
    written: u64,
}

impl SnapshotSchedule {
    /// An interval of 0 disables snapshots.
    pub fn new(interval: usize) -> Self {
        Self { interval, written: 0 }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval > 0
    }

    pub fn should_snapshot(&self, epoch: usize, finished: bool) -> bool {
        self.is_enabled() && (finished || epoch % self.interval == 0)
    }

    /// Clamps a batch of `step` epochs so it ends on the next snapshot epoch.
    pub fn batch_len(&self, epoch: usize, step: usize) -> usize {
        if !self.is_enabled() {
            return step;
        }
        step.min(self.interval - epoch % self.interval)
    }

    pub fn mark_snapshot(&mut self) {
        self.written += 1;
    }

    pub fn snapshot_count(&self) -> u64 {
        self.written
    }
}

/// Captures the world's population.
pub fn generate_snapshot(world: &World, run_id: usize) -> PopulationSnapshot {
    let agents: Vec<AgentSnapshot> = world
        .population()
        .iter()
        .enumerate()
        .map(|(id, agent)| AgentSnapshot {
            id,
            x: agent.x,
            y: agent.y,
            coop: agent.coop,
            fitness: agent.fitness,
            degree: agent.degree(),
        })
        .collect();

    let num_coop = world.count_coop();
    PopulationSnapshot {
        snapshot_id: generate_snapshot_id(run_id, world.epoch()),
        run_id,
        epoch: world.epoch(),
        params: world.active_params(),
        num_coop,
        num_defect: agents.len() - num_coop,
        agents,
    }
}

/// Writes a snapshot as `<dir>/<snapshot_id>.json`, creating `dir` if needed.
pub fn write_snapshot(dir: &Path, snapshot: &PopulationSnapshot) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", snapshot.snapshot_id));
    write_json(&path, snapshot)?;
    Ok(path)
}

/// Writes the run summary as `<dir>/summary.json`.
pub fn write_summary(dir: &Path, summary: &RunSummary) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(SUMMARY_FILE);
    write_json(&path, summary)?;
    Ok(path)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
