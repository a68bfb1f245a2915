//! Batch Runner
//!
//! Drives every queued run to completion on one world. Each run's freshly
//! set-up population is reported before its first batch, batches are cut
//! short so they end on snapshot epochs, and finished runs are collected
//! into a summary.

use std::path::Path;

use pd_events::RunSummary;

use crate::output::{generate_snapshot, write_snapshot, OutputError, SnapshotSchedule};
use crate::queue::RunQueue;
use crate::world::World;

/// Works through `queue` in batches of at most `step` epochs.
///
/// Snapshots due under `schedule` are written into `dir`. Returns the
/// summary of every finished run.
pub fn run_queue(
    world: &mut World,
    queue: &mut RunQueue,
    schedule: &mut SnapshotSchedule,
    step: usize,
    dir: &Path,
    seed: u64,
) -> Result<RunSummary, OutputError> {
    let step = step.max(1);
    let mut summary = RunSummary::new(seed);

    while let Some(started) = queue.front().map(|run| run.started) {
        let progress = if started {
            let batch = schedule.batch_len(world.epoch(), step);
            queue.advance(world, batch)
        } else {
            queue.start_front(world)
        };
        let Some(progress) = progress else {
            break;
        };

        tracing::info!(
            "[Run {:>3}] epoch {:>6}/{} - {} coop, {} defect",
            progress.run_id,
            progress.epoch,
            progress.params.e,
            progress.num_coop,
            progress.num_defect
        );

        if schedule.should_snapshot(progress.epoch, progress.finished) {
            let snapshot = generate_snapshot(world, progress.run_id);
            let path = write_snapshot(dir, &snapshot)?;
            schedule.mark_snapshot();
            tracing::debug!("Wrote snapshot {}", path.display());
        }

        if progress.finished {
            let stats = world.stats();
            tracing::debug!(
                "Run {} final population: mean fitness {:.3}, mean degree {:.2}",
                progress.run_id,
                stats.mean_fitness,
                stats.mean_degree
            );
            summary.runs.push(progress);
        }
    }

    Ok(summary)
}
