//! Simulation Parameters
//!
//! The typed parameter record a population is built from.
//!
//! # Example
//!
//! ```
//! use pd_events::{WorldParams, WrapMode};
//!
//! let params = WorldParams::new(0.1, 0.2, 100, 50);
//! assert_eq!(params.n, 100);
//! assert_eq!(params.wrap, WrapMode::Toroidal);
//! assert_eq!("first_axis_only".parse::<WrapMode>().unwrap(), WrapMode::FirstAxisOnly);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default neighborhood radius.
pub const DEFAULT_R: f64 = 0.02;

/// Default defection bonus (cost / benefit ratio).
pub const DEFAULT_U: f64 = 0.175;

/// Default population size.
pub const DEFAULT_N: usize = 6400;

/// Default epoch budget per run.
pub const DEFAULT_E: usize = 5000;

/// Which axes use the shorter arc when measuring distance on the torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Both axes wrap around.
    #[default]
    Toroidal,
    /// Only the x axis wraps; y distance is taken as-is.
    FirstAxisOnly,
}

impl WrapMode {
    /// Returns true if the y axis distance wraps.
    pub fn wraps_y(self) -> bool {
        matches!(self, WrapMode::Toroidal)
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapMode::Toroidal => write!(f, "toroidal"),
            WrapMode::FirstAxisOnly => write!(f, "first_axis_only"),
        }
    }
}

/// Error returned when a wrap mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWrapModeError(pub String);

impl fmt::Display for ParseWrapModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid wrap mode: '{}', expected 'toroidal' or 'first_axis_only'",
            self.0
        )
    }
}

impl std::error::Error for ParseWrapModeError {}

impl FromStr for WrapMode {
    type Err = ParseWrapModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "toroidal" | "torus" => Ok(WrapMode::Toroidal),
            "first_axis_only" | "x_only" => Ok(WrapMode::FirstAxisOnly),
            _ => Err(ParseWrapModeError(s.to_string())),
        }
    }
}

/// Parameters a population is set up with.
///
/// `r` is the neighbor radius, `u` the defection bonus, `n` the population
/// size and `e` the number of epochs a run lasts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldParams {
    pub r: f64,
    pub u: f64,
    pub n: usize,
    pub e: usize,
    /// Divide accumulated payoff by neighbor count
    #[serde(default)]
    pub use_average: bool,
    #[serde(default)]
    pub wrap: WrapMode,
}

impl WorldParams {
    /// Creates parameters with total-payoff fitness and toroidal wrapping.
    pub fn new(r: f64, u: f64, n: usize, e: usize) -> Self {
        Self {
            r,
            u,
            n,
            e,
            use_average: false,
            wrap: WrapMode::Toroidal,
        }
    }

    pub fn with_average(mut self, use_average: bool) -> Self {
        self.use_average = use_average;
        self
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    /// Squared neighbor radius, used for distance comparisons.
    pub fn r_sqr(&self) -> f64 {
        self.r * self.r
    }
}

impl Default for WorldParams {
    fn default() -> Self {
        Self::new(DEFAULT_R, DEFAULT_U, DEFAULT_N, DEFAULT_E)
    }
}
