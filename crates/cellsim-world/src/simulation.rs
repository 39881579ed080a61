//! Driver-facing contract shared by every engine.

use crate::elementary::LinearAutomaton1D;
use crate::epidemic::EpidemicGrid;
use crate::life::GridAutomaton2D;
use cellsim_core::{PopulationCounts, Result, SimulationConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A discrete-time engine an external driver can advance and inspect.
///
/// Instances are single-writer: callers must not step one concurrently.
pub trait Simulation {
    /// Advance one generation. On error the previous generation is kept.
    fn step(&mut self) -> Result<()>;

    /// Return to the initial configuration
    fn reset(&mut self);

    /// Steps taken since creation or the last reset
    fn generation(&self) -> u64;

    /// Read-only copy of the current state for visualizers
    fn snapshot(&self) -> Snapshot;
}

/// Serializable view of an engine's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Snapshot {
    Life {
        generation: u64,
        alive: usize,
        cells: Vec<Vec<u8>>,
    },
    Elementary {
        generation: u64,
        rule: u8,
        state: Vec<u8>,
        history: Vec<Vec<u8>>,
    },
    Epidemic {
        t: u64,
        counts: PopulationCounts,
        cells: Vec<Vec<u8>>,
    },
}

impl Snapshot {
    pub fn generation(&self) -> u64 {
        match self {
            Snapshot::Life { generation, .. } | Snapshot::Elementary { generation, .. } => {
                *generation
            }
            Snapshot::Epidemic { t, .. } => *t,
        }
    }
}

/// Build the engine a configuration describes, seeding any random source
/// from `seed`.
pub fn build_simulation(config: &SimulationConfig, seed: u64) -> Result<Box<dyn Simulation + Send>> {
    let sim: Box<dyn Simulation + Send> = match config {
        SimulationConfig::Life(config) => Box::new(GridAutomaton2D::seeded(config, seed)?),
        SimulationConfig::Elementary(config) => Box::new(LinearAutomaton1D::from_config(config)?),
        SimulationConfig::Epidemic(config) => Box::new(EpidemicGrid::seeded(config.clone(), seed)?),
    };
    info!("Built {} simulation", config.kind());
    Ok(sim)
}
