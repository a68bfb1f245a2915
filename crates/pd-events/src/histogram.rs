//! Neighbor-degree histogram.
//!
//! Serializes to CSV text:
//!
//! ```text
//! neighbors,count
//! 0,2
//! 1,0
//! 2,5
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

/// Header line of the CSV rendering.
pub const HISTOGRAM_HEADER: &str = "neighbors,count";

/// Number of agents per neighbor count, from degree 0 up to the largest
/// observed degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeHistogram {
    counts: Vec<usize>,
}

impl DegreeHistogram {
    /// Builds a histogram from per-agent degrees.
    ///
    /// An empty input yields the single bucket `(0, 0)`.
    pub fn from_degrees<I>(degrees: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut counts = vec![0usize];
        for degree in degrees {
            if degree >= counts.len() {
                counts.resize(degree + 1, 0);
            }
            counts[degree] += 1;
        }
        Self { counts }
    }

    /// Agent count for a degree, zero past the maximum.
    pub fn count(&self, degree: usize) -> usize {
        self.counts.get(degree).copied().unwrap_or(0)
    }

    /// Largest degree with a bucket.
    pub fn max_degree(&self) -> usize {
        self.counts.len() - 1
    }

    /// Smallest degree held by at least one agent.
    pub fn min_degree(&self) -> Option<usize> {
        self.counts.iter().position(|&c| c > 0)
    }

    /// Number of agents counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Mean neighbor count, 0.0 for an empty population.
    pub fn mean_degree(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let weighted: usize = self.pairs().map(|(d, c)| d * c).sum();
        weighted as f64 / total as f64
    }

    /// `(degree, count)` pairs in ascending degree order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().copied().enumerate()
    }

    /// Writes the CSV rendering and flushes the writer.
    pub fn write_csv<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }
}

impl fmt::Display for DegreeHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HISTOGRAM_HEADER)?;
        for (degree, count) in self.pairs() {
            writeln!(f, "{},{}", degree, count)?;
        }
        Ok(())
    }
}
