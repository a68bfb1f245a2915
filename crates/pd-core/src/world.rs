//! Population Engine
//!
//! `World` owns one population, its RNG and its parameters. Setting up
//! draws a fresh population, builds the neighbor graph and computes every
//! agent's fitness; running advances whole epochs of `N` reproduction calls
//! each, never past the epoch budget `E`.
//!
//! # Example
//!
//! ```
//! use pd_core::World;
//! use pd_events::WorldParams;
//!
//! let mut world = World::new(WorldParams::new(0.1, 0.175, 200, 20), 42);
//! assert_eq!(world.run(5), 5);
//! assert_eq!(world.epoch(), 5);
//! assert_eq!(world.run_to_end(), 15);
//! assert!(world.is_finished());
//! ```

use pd_events::{DegreeHistogram, WorldParams, WrapMode};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::components::agent::Agent;
use crate::components::payoff::PayoffTable;
use crate::output::stats::{count_coop, degree_histogram, PopulationStats};
use crate::systems::{build_neighbor_graph, calc_fitness, refresh_all_fitness, reproduce, ReproOutcome};

/// Passing this to [`World::run`] consumes the remaining epoch budget.
pub const RUN_UNBOUNDED: usize = usize::MAX;

/// Number of queued runs a fresh world reports.
pub const DEFAULT_NUM_RUNS: usize = 10;

/// A spatial Prisoner's Dilemma population.
#[derive(Debug, Clone)]
pub struct World {
    /// Parameters the next setup or reset will use
    params: WorldParams,
    /// Parameters the live population was built with
    active: WorldParams,
    num_runs: usize,
    rng: SmallRng,
    epoch: usize,
    payoff: PayoffTable,
    pop: Vec<Agent>,
    edge_count: usize,
    repro_calls: u64,
    flips: u64,
}

impl World {
    /// Creates a world and sets up its first population.
    pub fn new(params: WorldParams, seed: u64) -> Self {
        let mut world = Self::unpopulated(params, seed);
        world.setup(params);
        world
    }

    /// Creates a world holding `params` but no agents.
    ///
    /// Nothing is drawn from the RNG until the first setup, so a run queue
    /// can populate the world itself.
    pub fn unpopulated(params: WorldParams, seed: u64) -> Self {
        Self {
            params,
            active: WorldParams { n: 0, ..params },
            num_runs: DEFAULT_NUM_RUNS,
            rng: SmallRng::seed_from_u64(seed),
            epoch: 0,
            payoff: PayoffTable::from_defection_bonus(params.u),
            pop: Vec::new(),
            edge_count: 0,
            repro_calls: 0,
            flips: 0,
        }
    }

    /// Creates a world from a prescribed layout instead of a random draw.
    ///
    /// Strategies and positions are taken from `agents`; neighbor lists and
    /// fitness are rebuilt. `params.n` is replaced by the layout size.
    pub fn from_agents(mut params: WorldParams, seed: u64, agents: Vec<Agent>) -> Self {
        params.n = agents.len();
        let mut world = Self::unpopulated(params, seed);
        world.install(params, agents);
        world
    }

    /// Discards the current population and draws a new one.
    pub fn setup(&mut self, params: WorldParams) {
        let agents: Vec<Agent> = (0..params.n).map(|_| Agent::random(&mut self.rng)).collect();
        self.params = params;
        self.install(params, agents);
    }

    /// Sets up again with the stored parameters and a fresh draw.
    pub fn reset(&mut self) {
        self.setup(self.params);
    }

    fn install(&mut self, params: WorldParams, agents: Vec<Agent>) {
        self.active = params;
        self.epoch = 0;
        self.repro_calls = 0;
        self.flips = 0;
        self.payoff = PayoffTable::from_defection_bonus(params.u);
        self.pop = agents;

        self.edge_count = build_neighbor_graph(&mut self.pop, params.r_sqr(), params.wrap);
        refresh_all_fitness(&mut self.pop, &self.payoff, params.use_average);

        tracing::debug!(
            "Population set up: n={} r={} u={} edges={} wrap={}",
            self.pop.len(),
            params.r,
            params.u,
            self.edge_count,
            params.wrap
        );
    }

    /// Runs up to `steps` epochs, stopping at the epoch budget.
    ///
    /// Returns the number of epochs executed.
    pub fn run(&mut self, steps: usize) -> usize {
        let epochs = steps.min(self.remaining_epochs());
        for _ in 0..epochs {
            for _ in 0..self.pop.len() {
                self.reproduce();
            }
            self.epoch += 1;
        }
        tracing::trace!(
            "Ran {} epochs (epoch {}/{}, cooperators {})",
            epochs,
            self.epoch,
            self.active.e,
            self.count_coop()
        );
        epochs
    }

    /// Runs whatever remains of the epoch budget.
    pub fn run_to_end(&mut self) -> usize {
        self.run(RUN_UNBOUNDED)
    }

    /// One reproduction call on a random agent.
    pub fn reproduce(&mut self) -> Option<ReproOutcome> {
        let outcome = reproduce(
            &mut self.pop,
            &mut self.rng,
            &self.payoff,
            self.active.use_average,
        )?;
        self.repro_calls += 1;
        if outcome.flipped {
            self.flips += 1;
        }
        Some(outcome)
    }

    /// Fitness agent `id` should have under the current strategies, or
    /// `None` if there is no such agent.
    pub fn calc_fitness(&self, id: usize) -> Option<f64> {
        if id >= self.pop.len() {
            return None;
        }
        Some(calc_fitness(&self.pop, id, &self.payoff, self.active.use_average))
    }

    pub fn population(&self) -> &[Agent] {
        &self.pop
    }

    pub fn agent(&self, id: usize) -> Option<&Agent> {
        self.pop.get(id)
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn remaining_epochs(&self) -> usize {
        self.active.e.saturating_sub(self.epoch)
    }

    pub fn is_finished(&self) -> bool {
        self.epoch >= self.active.e
    }

    pub fn payoff(&self) -> &PayoffTable {
        &self.payoff
    }

    /// Undirected edges in the neighbor graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Reproduction calls since the last setup.
    pub fn reproduction_calls(&self) -> u64 {
        self.repro_calls
    }

    /// Strategy changes since the last setup.
    pub fn flip_count(&self) -> u64 {
        self.flips
    }

    pub fn count_coop(&self) -> usize {
        count_coop(&self.pop)
    }

    pub fn count_defect(&self) -> usize {
        self.pop.len() - self.count_coop()
    }

    pub fn degree_histogram(&self) -> DegreeHistogram {
        degree_histogram(&self.pop)
    }

    pub fn stats(&self) -> PopulationStats {
        PopulationStats::collect(&self.pop)
    }

    // Stored parameters. These are what the next setup or reset uses and
    // may differ from `active_params` after a setter call.

    pub fn params(&self) -> WorldParams {
        self.params
    }

    pub fn active_params(&self) -> WorldParams {
        self.active
    }

    pub fn r(&self) -> f64 {
        self.params.r
    }

    pub fn u(&self) -> f64 {
        self.params.u
    }

    pub fn n(&self) -> usize {
        self.params.n
    }

    pub fn e(&self) -> usize {
        self.params.e
    }

    pub fn use_average(&self) -> bool {
        self.params.use_average
    }

    pub fn wrap(&self) -> WrapMode {
        self.params.wrap
    }

    pub fn num_runs(&self) -> usize {
        self.num_runs
    }

    pub fn set_r(&mut self, r: f64) {
        self.params.r = r;
    }

    pub fn set_u(&mut self, u: f64) {
        self.params.u = u;
    }

    pub fn set_n(&mut self, n: usize) {
        self.params.n = n;
    }

    pub fn set_e(&mut self, e: usize) {
        self.params.e = e;
    }

    pub fn set_use_average(&mut self, use_average: bool) {
        self.params.use_average = use_average;
    }

    pub fn set_wrap(&mut self, wrap: WrapMode) {
        self.params.wrap = wrap;
    }

    pub fn set_num_runs(&mut self, num_runs: usize) {
        self.num_runs = num_runs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> WorldParams {
        WorldParams::new(0.15, 0.175, 120, 30)
    }

    #[test]
    fn test_setup_builds_population() {
        let world = World::new(small_params(), 1);
        assert_eq!(world.population().len(), 120);
        assert_eq!(world.epoch(), 0);
        assert!((world.payoff().dc - 1.175).abs() < 1e-12);

        let degree_sum: usize = world.population().iter().map(Agent::degree).sum();
        assert_eq!(degree_sum, 2 * world.edge_count());
    }

    #[test]
    fn test_run_capped_at_budget() {
        let mut world = World::new(small_params(), 2);
        assert_eq!(world.run(10), 10);
        assert_eq!(world.run(100), 20);
        assert_eq!(world.epoch(), 30);
        assert_eq!(world.run(1), 0);
        assert_eq!(world.epoch(), 30);
        assert!(world.is_finished());
    }

    #[test]
    fn test_run_counts_reproduction_calls() {
        let mut world = World::new(small_params(), 3);
        world.run(4);
        assert_eq!(world.reproduction_calls(), 4 * 120);
        assert!(world.flip_count() <= world.reproduction_calls());
    }

    #[test]
    fn test_setters_do_not_touch_live_population() {
        let mut world = World::new(small_params(), 4);
        world.set_n(10);
        world.set_r(0.5);
        world.set_u(0.9);
        world.set_e(3);

        assert_eq!(world.n(), 10);
        assert_eq!(world.population().len(), 120);
        assert_eq!(world.active_params().n, 120);
        assert_eq!(world.payoff().dd, 0.175);

        world.reset();
        assert_eq!(world.population().len(), 10);
        assert_eq!(world.active_params(), world.params());
        assert_eq!(world.payoff().dd, 0.9);
        assert_eq!(world.run_to_end(), 3);
    }

    #[test]
    fn test_reset_keeps_averaging_mode() {
        let params = small_params().with_average(true).with_wrap(WrapMode::FirstAxisOnly);
        let mut world = World::new(params, 5);
        world.run(2);
        world.reset();
        assert!(world.active_params().use_average);
        assert_eq!(world.active_params().wrap, WrapMode::FirstAxisOnly);
        assert_eq!(world.epoch(), 0);
        assert_eq!(world.reproduction_calls(), 0);
    }

    #[test]
    fn test_from_agents_uses_layout() {
        let agents = vec![
            Agent::new(0.1, 0.1, true),
            Agent::new(0.12, 0.1, false),
            Agent::new(0.6, 0.6, true),
        ];
        let world = World::from_agents(WorldParams::new(0.05, 0.2, 99, 5), 0, agents);
        assert_eq!(world.n(), 3);
        assert_eq!(world.active_params().n, 3);
        assert_eq!(world.population()[0].neighbors, vec![1]);
        assert_eq!(world.population()[0].fitness, 0.0);
        assert_eq!(world.population()[1].fitness, 1.2);
        assert!(world.population()[2].is_isolated());
    }

    #[test]
    fn test_empty_population_runs() {
        let mut world = World::new(WorldParams::new(0.1, 0.1, 0, 5), 6);
        assert_eq!(world.run(3), 3);
        assert_eq!(world.count_coop(), 0);
        assert_eq!(world.degree_histogram().to_string(), "neighbors,count\n0,0\n");
    }

    #[test]
    fn test_unpopulated_world_waits_for_setup() {
        let mut world = World::unpopulated(small_params(), 7);
        assert!(world.population().is_empty());
        assert_eq!(world.n(), 120);
        assert_eq!(world.active_params().n, 0);

        world.reset();
        let fresh = World::new(small_params(), 7);
        assert_eq!(world.population(), fresh.population());
    }

    #[test]
    fn test_calc_fitness_out_of_range() {
        let world = World::new(small_params(), 8);
        assert_eq!(world.calc_fitness(0), Some(world.population()[0].fitness));
        assert_eq!(world.calc_fitness(120), None);
        assert!(world.agent(120).is_none());
    }

    #[test]
    fn test_num_runs_default_and_setter() {
        let mut world = World::new(small_params(), 0);
        assert_eq!(world.num_runs(), DEFAULT_NUM_RUNS);
        world.set_num_runs(3);
        assert_eq!(world.num_runs(), 3);
    }
}
