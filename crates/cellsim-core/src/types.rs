//! Core type definitions shared by the simulators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Row/column position in a bounded grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset by a signed delta, or `None` if the result leaves a `rows`x`cols` grid.
    /// Grids are edge-clipped, never wrapped.
    pub fn offset(&self, dr: isize, dc: isize, rows: usize, cols: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Self { row, col })
    }
}

/// Offsets of the Moore neighbourhood, excluding the centre cell.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Health state of a cell in the epidemic model.
///
/// The discriminants are the integer codes exposed to visualizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum HealthState {
    Empty = 0,
    Susceptible = 1,
    Infected = 2,
    Recovered = 3,
    Dead = 4,
}

impl HealthState {
    pub const ALL: [HealthState; 5] = [
        HealthState::Empty,
        HealthState::Susceptible,
        HealthState::Infected,
        HealthState::Recovered,
        HealthState::Dead,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Recovered and dead cells never transition again.
    pub fn is_terminal(self) -> bool {
        matches!(self, HealthState::Recovered | HealthState::Dead)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HealthState::Empty => "empty",
            HealthState::Susceptible => "susceptible",
            HealthState::Infected => "infected",
            HealthState::Recovered => "recovered",
            HealthState::Dead => "dead",
        };
        f.write_str(name)
    }
}

/// Population of each health state in a grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub empty: usize,
    pub susceptible: usize,
    pub infected: usize,
    pub recovered: usize,
    pub dead: usize,
}

impl PopulationCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally an iterator of cell states
    pub fn tally<I>(states: I) -> Self
    where
        I: IntoIterator<Item = HealthState>,
    {
        let mut counts = Self::new();
        for state in states {
            counts[state] += 1;
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.empty + self.susceptible + self.infected + self.recovered + self.dead
    }

    /// (state, population) pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (HealthState, usize)> + '_ {
        HealthState::ALL.into_iter().map(move |state| (state, self[state]))
    }
}

impl Index<HealthState> for PopulationCounts {
    type Output = usize;

    fn index(&self, state: HealthState) -> &usize {
        match state {
            HealthState::Empty => &self.empty,
            HealthState::Susceptible => &self.susceptible,
            HealthState::Infected => &self.infected,
            HealthState::Recovered => &self.recovered,
            HealthState::Dead => &self.dead,
        }
    }
}

impl IndexMut<HealthState> for PopulationCounts {
    fn index_mut(&mut self, state: HealthState) -> &mut usize {
        match state {
            HealthState::Empty => &mut self.empty,
            HealthState::Susceptible => &mut self.susceptible,
            HealthState::Infected => &mut self.infected,
            HealthState::Recovered => &mut self.recovered,
            HealthState::Dead => &mut self.dead,
        }
    }
}
