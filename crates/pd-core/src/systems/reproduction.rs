//! Reproduction System
//!
//! Fitness-proportional imitation. A random focal agent draws from a pool
//! weighted by its neighbors' fitness plus its own; landing on its own share
//! keeps its strategy, landing on a neighbor's share copies that neighbor's
//! strategy. Fitness is only recomputed when the strategy actually flips.

use rand::Rng;

use crate::components::agent::Agent;
use crate::components::payoff::PayoffTable;
use crate::systems::fitness::refresh_neighborhood;

/// Result of one reproduction call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReproOutcome {
    /// Agent that was picked
    pub focal: usize,
    /// Neighbor whose strategy was copied, if any
    pub source: Option<usize>,
    /// Whether the focal agent's strategy changed
    pub flipped: bool,
}

/// Picks the neighbor whose strategy agent `id` adopts, or `None` to keep its
/// own.
///
/// Draws once from the RNG when neighbor fitness sums to a positive total,
/// never otherwise. Ties go to the earliest neighbor in list order.
pub fn select_source<R: Rng + ?Sized>(agents: &[Agent], id: usize, rng: &mut R) -> Option<usize> {
    let agent = &agents[id];
    let total_fitness: f64 = agent.neighbors.iter().map(|&n| agents[n].fitness).sum();

    if total_fitness <= 0.0 {
        return None;
    }

    // Focal agent's own fitness is the "stay" share of the pool.
    let mut choice = rng.gen::<f64>() * (total_fitness + agent.fitness);
    if choice >= total_fitness {
        return None;
    }

    for &n in &agent.neighbors {
        let fitness = agents[n].fitness;
        if choice < fitness {
            return Some(n);
        }
        choice -= fitness;
    }
    None
}

/// Runs one reproduction step on a uniformly random agent.
///
/// Returns `None` for an empty population.
pub fn reproduce<R: Rng + ?Sized>(
    agents: &mut [Agent],
    rng: &mut R,
    payoff: &PayoffTable,
    use_average: bool,
) -> Option<ReproOutcome> {
    if agents.is_empty() {
        return None;
    }

    let id = rng.gen_range(0..agents.len());
    let start_coop = agents[id].coop;

    let source = select_source(agents, id, rng);
    if let Some(n) = source {
        agents[id].coop = agents[n].coop;
    }

    let flipped = agents[id].coop != start_coop;
    if flipped {
        refresh_neighborhood(agents, id, payoff, use_average);
    }

    Some(ReproOutcome {
        focal: id,
        source,
        flipped,
    })
}
