//! Statistics Output
//!
//! Read-only population summaries.

use pd_events::DegreeHistogram;
use serde::Serialize;

use crate::components::agent::Agent;

/// Population-wide summary at one point in time
#[derive(Debug, Clone, Default, Serialize)]
pub struct PopulationStats {
    pub population: usize,
    pub num_coop: usize,
    pub num_defect: usize,
    pub coop_fraction: f64,
    pub mean_fitness: f64,
    pub mean_degree: f64,
}

impl PopulationStats {
    pub fn collect(agents: &[Agent]) -> Self {
        let population = agents.len();
        let num_coop = count_coop(agents);
        if population == 0 {
            return Self::default();
        }

        let fitness_sum: f64 = agents.iter().map(|a| a.fitness).sum();
        let degree_sum: usize = agents.iter().map(Agent::degree).sum();

        Self {
            population,
            num_coop,
            num_defect: population - num_coop,
            coop_fraction: num_coop as f64 / population as f64,
            mean_fitness: fitness_sum / population as f64,
            mean_degree: degree_sum as f64 / population as f64,
        }
    }
}

/// Number of cooperators.
pub fn count_coop(agents: &[Agent]) -> usize {
    agents.iter().filter(|a| a.coop).count()
}

/// Histogram of neighbor counts.
pub fn degree_histogram(agents: &[Agent]) -> DegreeHistogram {
    DegreeHistogram::from_degrees(agents.iter().map(Agent::degree))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Agent> {
        let mut agents = vec![
            Agent::new(0.1, 0.1, true),
            Agent::new(0.2, 0.1, false),
            Agent::new(0.3, 0.1, true),
            Agent::new(0.9, 0.9, true),
        ];
        agents[0].neighbors = vec![1, 2];
        agents[1].neighbors = vec![0];
        agents[2].neighbors = vec![0];
        agents[0].fitness = 1.0;
        agents[1].fitness = 3.0;
        agents
    }

    #[test]
    fn test_count_coop() {
        let agents = sample();
        assert_eq!(count_coop(&agents), 3);
        assert_eq!(count_coop(&[]), 0);
    }

    #[test]
    fn test_degree_histogram() {
        let hist = degree_histogram(&sample());
        assert_eq!(hist.pairs().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 1)]);
        assert_eq!(hist.to_string(), "neighbors,count\n0,1\n1,2\n2,1\n");
    }

    #[test]
    fn test_population_stats() {
        let stats = PopulationStats::collect(&sample());
        assert_eq!(stats.population, 4);
        assert_eq!(stats.num_coop + stats.num_defect, 4);
        assert_eq!(stats.coop_fraction, 0.75);
        assert_eq!(stats.mean_fitness, 1.0);
        assert_eq!(stats.mean_degree, 1.0);
    }

    #[test]
    fn test_empty_population_stats() {
        let stats = PopulationStats::collect(&[]);
        assert_eq!(stats.population, 0);
        assert_eq!(stats.coop_fraction, 0.0);
    }
}
