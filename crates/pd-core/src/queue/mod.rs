//! Run Queue
//!
//! Works through a first-in first-out list of run configurations on a single
//! `World`. [`RunQueue::start_front`] sets up the front run and reports its
//! epoch 0 state; each call to [`RunQueue::advance`] runs a batch of epochs
//! (starting the front run first if needed) and records progress. A run
//! leaves the queue once it has used its whole epoch budget.

use std::collections::VecDeque;

use pd_events::{RunProgress, WorldParams};

use crate::world::World;

/// One queued run and its latest progress.
#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
    pub id: usize,
    pub params: WorldParams,
    pub started: bool,
    pub cur_epoch: usize,
    pub num_coop: usize,
    pub num_defect: usize,
}

impl RunInfo {
    pub fn new(id: usize, params: WorldParams) -> Self {
        Self {
            id,
            params,
            started: false,
            cur_epoch: 0,
            num_coop: 0,
            num_defect: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.started && self.cur_epoch >= self.params.e
    }

    pub fn progress(&self) -> RunProgress {
        RunProgress {
            run_id: self.id,
            params: self.params,
            epoch: self.cur_epoch,
            num_coop: self.num_coop,
            num_defect: self.num_defect,
            finished: self.is_finished(),
        }
    }
}

/// Pending runs plus the history of finished ones.
#[derive(Debug, Clone, Default)]
pub struct RunQueue {
    runs: VecDeque<RunInfo>,
    completed: Vec<RunInfo>,
    next_id: usize,
}

impl RunQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one run and returns its id.
    pub fn add_run(&mut self, params: WorldParams) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.runs.push_back(RunInfo::new(id, params));
        tracing::debug!("Queued run {} (r={} u={} n={} e={})", id, params.r, params.u, params.n, params.e);
        id
    }

    /// Queues `count` runs with the same parameters.
    pub fn add_runs(&mut self, params: WorldParams, count: usize) -> Vec<usize> {
        (0..count).map(|_| self.add_run(params)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn runs_remaining(&self) -> usize {
        self.runs.len()
    }

    pub fn front(&self) -> Option<&RunInfo> {
        self.runs.front()
    }

    /// Drops the front run without recording it as completed.
    pub fn remove_run(&mut self) -> Option<RunInfo> {
        self.runs.pop_front()
    }

    pub fn completed(&self) -> &[RunInfo] {
        &self.completed
    }

    /// Sets up the front run if it has not started yet.
    ///
    /// Returns the front run's progress without running any epochs, or
    /// `None` when the queue is empty. A run with a zero epoch budget is
    /// finished as soon as it starts.
    pub fn start_front(&mut self, world: &mut World) -> Option<RunProgress> {
        let run = self.runs.front_mut()?;
        if !run.started {
            world.setup(run.params);
            run.started = true;
            tracing::info!(
                "Starting run {}: r={} u={} n={} e={}",
                run.id,
                run.params.r,
                run.params.u,
                run.params.n,
                run.params.e
            );
        }
        self.record(world)
    }

    /// Advances the front run by up to `steps` epochs.
    ///
    /// Returns the front run's progress, or `None` when the queue is empty.
    pub fn advance(&mut self, world: &mut World, steps: usize) -> Option<RunProgress> {
        let started = self.start_front(world)?;
        if started.finished {
            return Some(started);
        }
        world.run(steps);
        self.record(world)
    }

    /// Copies the world's state into the front run, retiring it when done.
    fn record(&mut self, world: &World) -> Option<RunProgress> {
        let run = self.runs.front_mut()?;
        run.cur_epoch = world.epoch();
        run.num_coop = world.count_coop();
        run.num_defect = world.population().len() - run.num_coop;
        let progress = run.progress();

        if progress.finished {
            tracing::info!(
                "Finished run {} at epoch {}: {} cooperators, {} defectors",
                progress.run_id,
                progress.epoch,
                progress.num_coop,
                progress.num_defect
            );
            if let Some(done) = self.runs.pop_front() {
                self.completed.push(done);
            }
        }
        Some(progress)
    }
}
