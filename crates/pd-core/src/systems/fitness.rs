//! Fitness System
//!
//! An agent's fitness is the payoff it collects playing one round against
//! each neighbor. With averaging enabled the total is divided by the number
//! of neighbors; an isolated agent then has fitness 0.0.

use crate::components::agent::Agent;
use crate::components::payoff::PayoffTable;

/// Computes the fitness agent `id` should have given current strategies.
///
/// Reads only the agent's own strategy and its neighbors' strategies.
/// `id` and every neighbor index must be in bounds for `agents`.
pub fn calc_fitness(agents: &[Agent], id: usize, payoff: &PayoffTable, use_average: bool) -> f64 {
    let agent = &agents[id];

    let c_count = agent.neighbors.iter().filter(|&&n| agents[n].coop).count();
    let d_count = agent.neighbors.len() - c_count;

    let (c_value, d_value) = payoff.row(agent.coop);
    let total = c_value * c_count as f64 + d_value * d_count as f64;

    if !use_average {
        return total;
    }
    if agent.neighbors.is_empty() {
        0.0
    } else {
        total / agent.neighbors.len() as f64
    }
}

/// Recomputes fitness for every agent.
pub fn refresh_all_fitness(agents: &mut [Agent], payoff: &PayoffTable, use_average: bool) {
    for id in 0..agents.len() {
        agents[id].fitness = calc_fitness(agents, id, payoff, use_average);
    }
}

/// Recomputes fitness for agent `id` and each of its neighbors.
///
/// Call after `id` changes strategy.
pub fn refresh_neighborhood(agents: &mut [Agent], id: usize, payoff: &PayoffTable, use_average: bool) {
    agents[id].fitness = calc_fitness(agents, id, payoff, use_average);
    for k in 0..agents[id].neighbors.len() {
        let n = agents[id].neighbors[k];
        agents[n].fitness = calc_fitness(agents, n, payoff, use_average);
    }
}
