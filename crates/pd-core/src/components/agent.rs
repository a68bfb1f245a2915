//! Agent Components
//!
//! One member of the population: position on the unit torus, strategy,
//! fitness and neighbor list.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A population member.
///
/// `neighbors` holds indices into the owning population, in ascending
/// discovery order from graph construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Position in [0, 1)
    pub x: f64,
    pub y: f64,
    /// Cooperator (true) or defector (false)
    pub coop: bool,
    pub fitness: f64,
    #[serde(default)]
    pub neighbors: Vec<usize>,
}

impl Agent {
    /// Creates an unconnected agent with zero fitness.
    pub fn new(x: f64, y: f64, coop: bool) -> Self {
        Self {
            x,
            y,
            coop,
            fitness: 0.0,
            neighbors: Vec::new(),
        }
    }

    /// Draws a uniformly placed agent with a fair-coin strategy.
    ///
    /// Consumes three draws in order: x, y, strategy.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = rng.gen::<f64>();
        let y = rng.gen::<f64>();
        let coop = rng.gen_bool(0.5);
        Self::new(x, y, coop)
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_isolated(&self) -> bool {
        self.neighbors.is_empty()
    }
}
