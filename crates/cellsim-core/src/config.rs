//! Configuration types for the simulators.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Smallest accepted grid side for the 2D engines
pub const MIN_GRID_DIM: usize = 5;
/// Smallest accepted cell count for the 1D automaton
pub const MIN_AUTOMATON_LENGTH: usize = 10;
/// Largest elementary rule code
pub const MAX_RULE: i64 = 255;

fn check_probability(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::Configuration(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_dims(rows: usize, cols: usize) -> Result<()> {
    if rows < MIN_GRID_DIM || cols < MIN_GRID_DIM {
        return Err(Error::Configuration(format!(
            "grid must be at least {min}x{min}, got {}x{}",
            rows,
            cols,
            min = MIN_GRID_DIM
        )));
    }
    Ok(())
}

/// Two-dimensional life automaton parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Probability of each cell starting alive (0.0 to 1.0)
    pub density: f64,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            density: 0.2,
        }
    }
}

impl LifeConfig {
    pub fn validate(&self) -> Result<()> {
        check_dims(self.rows, self.cols)?;
        check_probability("density", self.density)
    }
}

/// Elementary (one-dimensional) automaton parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementaryConfig {
    /// Number of cells in the ring
    pub length: usize,
    /// Wolfram rule code (0 to 255). Signed so negative codes reach validation.
    pub rule: i64,
}

impl Default for ElementaryConfig {
    fn default() -> Self {
        Self {
            length: 300,
            rule: 30,
        }
    }
}

impl ElementaryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.length < MIN_AUTOMATON_LENGTH {
            return Err(Error::Configuration(format!(
                "automaton length must be at least {}, got {}",
                MIN_AUTOMATON_LENGTH, self.length
            )));
        }
        self.rule_code().map(|_| ())
    }

    /// The rule as an 8-bit code, rejecting anything outside [0, 255]
    pub fn rule_code(&self) -> Result<u8> {
        u8::try_from(self.rule).map_err(|_| {
            Error::Configuration(format!(
                "rule must be within [0, {}], got {}",
                MAX_RULE, self.rule
            ))
        })
    }
}

/// Epidemic grid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpidemicConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Number of infection seeds placed at creation (positions may repeat)
    pub init_infected: usize,
    /// Per-neighbour infection probability per step
    pub p_infect: f64,
    /// Per-step recovery probability of an infected cell
    pub p_recover: f64,
    /// Per-step death probability of an infected cell
    pub p_die: f64,
}

impl Default for EpidemicConfig {
    fn default() -> Self {
        Self {
            rows: 60,
            cols: 60,
            init_infected: 5,
            p_infect: 0.25,
            p_recover: 0.02,
            p_die: 0.005,
        }
    }
}

impl EpidemicConfig {
    pub fn validate(&self) -> Result<()> {
        check_dims(self.rows, self.cols)?;
        check_probability("p_infect", self.p_infect)?;
        check_probability("p_recover", self.p_recover)?;
        check_probability("p_die", self.p_die)?;

        let cells = self.rows.saturating_mul(self.cols);
        if self.init_infected == 0 || self.init_infected > cells {
            return Err(Error::Configuration(format!(
                "init_infected must be within [1, {}], got {}",
                cells, self.init_infected
            )));
        }
        Ok(())
    }
}

/// Which engine to build, with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationConfig {
    Life(LifeConfig),
    Elementary(ElementaryConfig),
    Epidemic(EpidemicConfig),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig::Epidemic(EpidemicConfig::default())
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        match self {
            SimulationConfig::Life(config) => config.validate(),
            SimulationConfig::Elementary(config) => config.validate(),
            SimulationConfig::Epidemic(config) => config.validate(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SimulationConfig::Life(_) => "life",
            SimulationConfig::Elementary(_) => "elementary",
            SimulationConfig::Epidemic(_) => "epidemic",
        }
    }
}

/// Headless driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Engine to drive
    pub simulation: SimulationConfig,
    /// Seed for the engine's random source
    pub seed: u64,
    /// Number of steps to run
    pub steps: u64,
    /// Delay between steps (milliseconds), 0 runs flat out
    pub tick_interval_ms: u64,
    /// Log aggregate statistics every N steps
    pub log_every: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            seed: 0,
            steps: 200,
            tick_interval_ms: 100,
            log_every: 10,
        }
    }
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.log_every == 0 {
            return Err(Error::Configuration("log_every must be positive".to_string()));
        }
        self.simulation.validate()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
