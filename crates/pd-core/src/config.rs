//! Configuration loading for the simulation binary.
//!
//! Settings are read from an optional TOML file; every section and field
//! falls back to its default when absent.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use pd_events::{WorldParams, WrapMode};

use crate::world::DEFAULT_NUM_RUNS;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Population parameters
    #[serde(default)]
    pub world: WorldConfig,
    /// Queue and RNG settings
    #[serde(default)]
    pub run: RunConfig,
    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if !world.r.is_finite() || world.r < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "world.r must be a non-negative number, got {}",
                world.r
            )));
        }
        if !world.u.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "world.u must be finite, got {}",
                world.u
            )));
        }
        if world.n == 0 {
            return Err(ConfigError::Invalid("world.n must be at least 1".to_string()));
        }
        if self.run.step == 0 {
            return Err(ConfigError::Invalid("run.step must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Population parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Neighborhood radius
    pub r: f64,
    /// Defection bonus (cost / benefit ratio)
    pub u: f64,
    /// Population size
    pub n: usize,
    /// Epochs per run
    pub e: usize,
    /// Use average payoff instead of total payoff as fitness
    pub use_average: bool,
    /// Torus wrap mode
    pub wrap: WrapMode,
}

impl WorldConfig {
    pub fn params(&self) -> WorldParams {
        WorldParams::new(self.r, self.u, self.n, self.e)
            .with_average(self.use_average)
            .with_wrap(self.wrap)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        let params = WorldParams::default();
        Self {
            r: params.r,
            u: params.u,
            n: params.n,
            e: params.e,
            use_average: params.use_average,
            wrap: params.wrap,
        }
    }
}

/// Queue and RNG settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// RNG seed for the whole batch
    pub seed: u64,
    /// Number of runs to queue
    pub runs: usize,
    /// Epochs per progress report
    pub step: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            runs: DEFAULT_NUM_RUNS,
            step: 100,
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for snapshots and the summary
    pub dir: PathBuf,
    /// Epochs between population snapshots (0 disables)
    pub snapshot_interval: usize,
    /// Write summary.json after the last run
    pub write_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            snapshot_interval: 0,
            write_summary: true,
        }
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Spatial Prisoner's Dilemma configuration

[world]
r = 0.02
u = 0.175
n = 6400
e = 5000
use_average = false
# "toroidal" wraps both axes, "first_axis_only" wraps x only
wrap = "toroidal"

[run]
seed = 0
runs = 10
step = 100

[output]
dir = "output"
snapshot_interval = 0
write_summary = true
"#
    .to_string()
}
