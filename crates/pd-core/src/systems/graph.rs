//! Neighbor Graph
//!
//! Connects every pair of agents closer than the neighbor radius on the unit
//! torus. Pairs are visited with the outer index ascending from 1 and the
//! inner index ascending below it, so every neighbor list ends up sorted by
//! index. Reproduction walks neighbor lists in this order.

use pd_events::WrapMode;

use crate::components::agent::Agent;

/// Distance along one axis, taking the shorter way around the torus.
pub fn torus_axis_distance(a: f64, b: f64) -> f64 {
    let dist = (a - b).abs();
    if dist > 1.0 - dist {
        1.0 - dist
    } else {
        dist
    }
}

/// Squared distance between two agents under a wrap mode.
pub fn distance_sqr(a: &Agent, b: &Agent, wrap: WrapMode) -> f64 {
    let x_dist = torus_axis_distance(a.x, b.x);
    let y_dist = if wrap.wraps_y() {
        torus_axis_distance(a.y, b.y)
    } else {
        (a.y - b.y).abs()
    };
    x_dist * x_dist + y_dist * y_dist
}

/// Rebuilds every agent's neighbor list from scratch.
///
/// A pair is connected iff its squared distance is strictly below `r_sqr`.
/// Returns the number of undirected edges.
pub fn build_neighbor_graph(agents: &mut [Agent], r_sqr: f64, wrap: WrapMode) -> usize {
    for agent in agents.iter_mut() {
        agent.neighbors.clear();
    }

    let mut edges = 0;
    for i in 1..agents.len() {
        for j in 0..i {
            if distance_sqr(&agents[i], &agents[j], wrap) < r_sqr {
                agents[i].neighbors.push(j);
                agents[j].neighbors.push(i);
                edges += 1;
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_distance_wraps() {
        assert!((torus_axis_distance(0.1, 0.3) - 0.2).abs() < 1e-12);
        assert!((torus_axis_distance(0.05, 0.95) - 0.1).abs() < 1e-12);
        assert!((torus_axis_distance(0.95, 0.05) - 0.1).abs() < 1e-12);
        assert_eq!(torus_axis_distance(0.0, 0.5), 0.5);
    }

    #[test]
    fn test_y_wrap_depends_on_mode() {
        // Close across the top/bottom seam, far apart without wrapping.
        let a = Agent::new(0.5, 0.02, true);
        let b = Agent::new(0.5, 0.98, true);

        assert!(distance_sqr(&a, &b, WrapMode::Toroidal) < 0.05 * 0.05);
        assert!(distance_sqr(&a, &b, WrapMode::FirstAxisOnly) > 0.9 * 0.9);
    }

    #[test]
    fn test_x_wrap_in_both_modes() {
        let a = Agent::new(0.01, 0.5, true);
        let b = Agent::new(0.99, 0.5, false);
        for mode in [WrapMode::Toroidal, WrapMode::FirstAxisOnly] {
            assert!(distance_sqr(&a, &b, mode) < 0.03 * 0.03);
        }
    }

    #[test]
    fn test_seam_pair_connected_only_when_toroidal() {
        let layout = || {
            vec![
                Agent::new(0.5, 0.02, true),
                Agent::new(0.5, 0.98, false),
                Agent::new(0.1, 0.5, true),
            ]
        };

        let mut torus = layout();
        let edges = build_neighbor_graph(&mut torus, 0.05 * 0.05, WrapMode::Toroidal);
        assert_eq!(edges, 1);
        assert_eq!(torus[0].neighbors, vec![1]);
        assert_eq!(torus[1].neighbors, vec![0]);
        assert!(torus[2].neighbors.is_empty());

        let mut literal = layout();
        let edges = build_neighbor_graph(&mut literal, 0.05 * 0.05, WrapMode::FirstAxisOnly);
        assert_eq!(edges, 0);
        assert!(literal.iter().all(Agent::is_isolated));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut agents = vec![Agent::new(0.25, 0.5, true), Agent::new(0.75, 0.5, true)];
        // Distance is exactly 0.5 both ways round.
        build_neighbor_graph(&mut agents, 0.25, WrapMode::Toroidal);
        assert!(agents[0].is_isolated());

        build_neighbor_graph(&mut agents, 0.26, WrapMode::Toroidal);
        assert_eq!(agents[0].neighbors, vec![1]);
    }

    #[test]
    fn test_neighbor_lists_sorted_and_rebuilt() {
        let mut agents: Vec<Agent> = (0..6)
            .map(|i| Agent::new(0.1 * i as f64, 0.5, i % 2 == 0))
            .collect();

        build_neighbor_graph(&mut agents, 1.0, WrapMode::Toroidal);
        for (id, agent) in agents.iter().enumerate() {
            let expected: Vec<usize> = (0..6).filter(|&j| j != id).collect();
            assert_eq!(agent.neighbors, expected);
        }

        // A second build replaces rather than appends.
        build_neighbor_graph(&mut agents, 0.0, WrapMode::Toroidal);
        assert!(agents.iter().all(Agent::is_isolated));
    }
}
