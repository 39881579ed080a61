//! Simulation engines.
//!
//! Three independent discrete-time simulators: a 2D life automaton, an
//! elementary 1D automaton, and a stochastic epidemic grid.

pub mod grid;
pub mod history;
pub mod rule;
pub mod life;
pub mod elementary;
pub mod epidemic;
pub mod simulation;

pub use grid::Grid;
pub use history::History;
pub use rule::RuleTable;
pub use life::GridAutomaton2D;
pub use elementary::LinearAutomaton1D;
pub use epidemic::EpidemicGrid;
pub use simulation::{build_simulation, Simulation, Snapshot};
