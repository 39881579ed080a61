//! Stochastic five-state epidemic on an edge-clipped grid.

use crate::grid::Grid;
use crate::simulation::{Simulation, Snapshot};
use cellsim_core::{EpidemicConfig, Error, HealthState, Position, PopulationCounts, Result};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, trace};

/// Probability that a susceptible cell is infected by `k` infected neighbours,
/// each exposure independent: `1 - (1 - p)^k`.
pub fn infection_probability(p_infect: f64, infected_neighbours: usize) -> f64 {
    let k = i32::try_from(infected_neighbours).unwrap_or(i32::MAX);
    1.0 - (1.0 - p_infect).powi(k)
}

#[derive(Debug)]
pub struct EpidemicGrid<R: Rng = ChaCha8Rng> {
    config: EpidemicConfig,
    grid: Grid<HealthState>,
    scratch: Grid<HealthState>,
    counts: PopulationCounts,
    t: u64,
    rng: R,
}

impl EpidemicGrid<ChaCha8Rng> {
    pub fn seeded(config: EpidemicConfig, seed: u64) -> Result<Self> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> EpidemicGrid<R> {
    /// Validate the configuration, then fill the grid with susceptible cells
    /// and place `init_infected` seeds at uniformly drawn positions.
    #[instrument(skip(config, rng), fields(rows = config.rows, cols = config.cols))]
    pub fn new(config: EpidemicConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.rows, config.cols, HealthState::Susceptible);
        let mut sim = Self {
            scratch: grid.clone(),
            grid,
            counts: PopulationCounts::new(),
            t: 0,
            config,
            rng,
        };
        sim.seed_infections();
        debug!(
            "Created {}x{} epidemic grid with {} infected",
            sim.config.rows, sim.config.cols, sim.counts.infected
        );
        Ok(sim)
    }

    fn seed_infections(&mut self) {
        self.grid.fill(HealthState::Susceptible);
        // Positions may repeat, leaving fewer distinct infected cells
        for _ in 0..self.config.init_infected {
            let row = self.rng.gen_range(0..self.config.rows);
            let col = self.rng.gen_range(0..self.config.cols);
            if let Some(cell) = self.grid.get_mut(Position::new(row, col)) {
                *cell = HealthState::Infected;
            }
        }
        self.counts = PopulationCounts::tally(self.grid.cells().iter().copied());
        self.t = 0;
    }

    /// Bernoulli trial: `true` with probability `p`
    fn roll(rng: &mut R, p: f64) -> bool {
        rng.gen::<f64>() < p
    }

    pub fn config(&self) -> &EpidemicConfig {
        &self.config
    }

    pub fn t(&self) -> u64 {
        self.t
    }

    pub fn counts(&self) -> PopulationCounts {
        self.counts
    }

    pub fn state_at(&self, row: usize, col: usize) -> Option<HealthState> {
        self.grid.get(Position::new(row, col))
    }

    pub fn grid(&self) -> &Grid<HealthState> {
        &self.grid
    }

    fn total_cells(&self) -> usize {
        self.config.rows * self.config.cols
    }
}

impl<R: Rng> Simulation for EpidemicGrid<R> {
    fn step(&mut self) -> Result<()> {
        let EpidemicConfig {
            p_infect,
            p_recover,
            p_die,
            ..
        } = self.config;
        let grid = &self.grid;
        let rng = &mut self.rng;

        grid.map_into(&mut self.scratch, |pos, state| match state {
            HealthState::Susceptible => {
                let k = grid.count_neighbours(pos, |s| s == HealthState::Infected);
                if k > 0 && Self::roll(rng, infection_probability(p_infect, k)) {
                    HealthState::Infected
                } else {
                    HealthState::Susceptible
                }
            }
            // Death is rolled first; recovery only when the death roll fails
            HealthState::Infected => {
                if Self::roll(rng, p_die) {
                    HealthState::Dead
                } else if Self::roll(rng, p_recover) {
                    HealthState::Recovered
                } else {
                    HealthState::Infected
                }
            }
            other => other,
        });

        let counts = PopulationCounts::tally(self.scratch.cells().iter().copied());
        if counts.total() != self.total_cells() {
            return Err(Error::InvariantViolation(format!(
                "population counts sum to {}, grid holds {} cells",
                counts.total(),
                self.total_cells()
            )));
        }

        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.counts = counts;
        self.t += 1;
        trace!(
            t = self.t,
            susceptible = counts.susceptible,
            infected = counts.infected,
            recovered = counts.recovered,
            dead = counts.dead,
            "epidemic step"
        );
        Ok(())
    }

    /// Reseed a fresh outbreak with the same parameters. The new seed
    /// positions are the generator's next draws.
    fn reset(&mut self) {
        self.seed_infections();
        debug!("Epidemic reset with {} infected", self.counts.infected);
    }

    fn generation(&self) -> u64 {
        self.t
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Epidemic {
            t: self.t,
            counts: self.counts,
            cells: self.grid.to_rows(HealthState::code),
        }
    }
}
