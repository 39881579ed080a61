//! Moore-neighbourhood binary automaton (B3/S23) on an edge-clipped grid.

use crate::grid::Grid;
use crate::simulation::{Simulation, Snapshot};
use cellsim_core::{Error, LifeConfig, Position, Result};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, trace};

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

/// Next state of a cell given its alive Moore-neighbour count
pub fn next_cell(cell: u8, alive_neighbours: usize) -> u8 {
    match (cell, alive_neighbours) {
        (ALIVE, 2) | (ALIVE, 3) | (DEAD, 3) => ALIVE,
        _ => DEAD,
    }
}

#[derive(Debug)]
pub struct GridAutomaton2D<R: Rng = ChaCha8Rng> {
    grid: Grid<u8>,
    scratch: Grid<u8>,
    /// Configuration restored by `reset`
    initial: Grid<u8>,
    generation: u64,
    rng: R,
}

impl GridAutomaton2D<ChaCha8Rng> {
    /// Build from a validated configuration and randomize at its density
    #[instrument(skip(config), fields(rows = config.rows, cols = config.cols))]
    pub fn seeded(config: &LifeConfig, seed: u64) -> Result<Self> {
        Self::from_config(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GridAutomaton2D<R> {
    /// Create an all-dead grid. Only zero dimensions are rejected here;
    /// practical minimums are enforced by `LifeConfig::validate`.
    pub fn new(rows: usize, cols: usize, rng: R) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::Configuration(format!(
                "grid dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }
        let grid = Grid::new(rows, cols, DEAD);
        Ok(Self {
            scratch: grid.clone(),
            initial: grid.clone(),
            grid,
            generation: 0,
            rng,
        })
    }

    pub fn from_config(config: &LifeConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let mut automaton = Self::new(config.rows, config.cols, rng)?;
        automaton.randomize(config.density)?;
        debug!(
            "Created {}x{} life grid with {} alive cells",
            config.rows,
            config.cols,
            automaton.alive_count()
        );
        Ok(automaton)
    }

    /// Overwrite every cell with an independent Bernoulli(p) draw.
    /// The result becomes the configuration `reset` returns to.
    pub fn randomize(&mut self, p: f64) -> Result<()> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(Error::Configuration(format!(
                "density must be within [0, 1], got {}",
                p
            )));
        }
        let rng = &mut self.rng;
        let mut next = Grid::new(self.grid.rows(), self.grid.cols(), DEAD);
        self.grid.map_into(&mut next, |_, _| {
            if rng.gen::<f64>() < p {
                ALIVE
            } else {
                DEAD
            }
        });
        self.grid = next;
        self.initial = self.grid.clone();
        self.generation = 0;
        Ok(())
    }

    /// Seed a single cell, for placing patterns
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        let value = if alive { ALIVE } else { DEAD };
        self.grid.set(Position::new(row, col), value)?;
        if self.generation == 0 {
            self.initial = self.grid.clone();
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.grid.fill(DEAD);
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.grid.get(Position::new(row, col)) == Some(ALIVE)
    }

    pub fn alive_count(&self) -> usize {
        self.grid.cells().iter().filter(|&&cell| cell == ALIVE).count()
    }

    pub fn grid(&self) -> &Grid<u8> {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }
}

impl<R: Rng> Simulation for GridAutomaton2D<R> {
    fn step(&mut self) -> Result<()> {
        let grid = &self.grid;
        grid.map_into(&mut self.scratch, |pos, cell| {
            next_cell(cell, grid.count_neighbours(pos, |c| c == ALIVE))
        });

        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;
        trace!(generation = self.generation, alive = self.alive_count(), "life step");
        Ok(())
    }

    fn reset(&mut self) {
        self.grid = self.initial.clone();
        self.generation = 0;
        debug!("Life grid reset to its initial configuration");
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Life {
            generation: self.generation,
            alive: self.alive_count(),
            cells: self.grid.to_rows(|cell| cell),
        }
    }
}
