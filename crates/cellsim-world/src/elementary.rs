//! Elementary one-dimensional automaton on a ring, with a bounded history.

use crate::history::{History, DEFAULT_HISTORY_CAPACITY};
use crate::rule::RuleTable;
use crate::simulation::{Simulation, Snapshot};
use cellsim_core::{ElementaryConfig, Error, Result};
use tracing::{debug, instrument, trace};

#[derive(Debug)]
pub struct LinearAutomaton1D {
    table: RuleTable,
    state: Vec<u8>,
    scratch: Vec<u8>,
    history: History<Vec<u8>>,
    generation: u64,
}

impl LinearAutomaton1D {
    /// Create an automaton seeded with a single alive cell at `length / 2`.
    /// Only a zero length is rejected here; `ElementaryConfig::validate`
    /// enforces the practical minimum.
    pub fn new(length: usize, rule: u8) -> Result<Self> {
        if length == 0 {
            return Err(Error::Configuration(
                "automaton length must be positive".to_string(),
            ));
        }
        let mut automaton = Self {
            table: RuleTable::new(rule),
            state: Vec::new(),
            scratch: Vec::with_capacity(length),
            history: History::with_capacity(DEFAULT_HISTORY_CAPACITY),
            generation: 0,
        };
        automaton.seed(length);
        Ok(automaton)
    }

    #[instrument(skip(config), fields(length = config.length, rule = config.rule))]
    pub fn from_config(config: &ElementaryConfig) -> Result<Self> {
        config.validate()?;
        let automaton = Self::new(config.length, config.rule_code()?)?;
        debug!("Created rule {} automaton of length {}", config.rule, config.length);
        Ok(automaton)
    }

    fn seed(&mut self, length: usize) {
        self.state = vec![0; length];
        self.state[length / 2] = 1;
        self.history.clear();
        self.history.push(self.state.clone());
        self.generation = 0;
    }

    pub fn rule(&self) -> u8 {
        self.table.rule()
    }

    pub fn rule_table(&self) -> &RuleTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn state(&self) -> &[u8] {
        &self.state
    }

    /// Past generations, oldest first, ending with the current state
    pub fn history(&self) -> impl DoubleEndedIterator<Item = &[u8]> + '_ {
        self.history.iter().map(Vec::as_slice)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Simulation for LinearAutomaton1D {
    fn step(&mut self) -> Result<()> {
        let len = self.state.len();
        let state = &self.state;
        let table = &self.table;

        self.scratch.clear();
        self.scratch.extend((0..len).map(|i| {
            let left = state[(i + len - 1) % len];
            let right = state[(i + 1) % len];
            table.lookup((left, state[i], right))
        }));

        std::mem::swap(&mut self.state, &mut self.scratch);
        self.history.push(self.state.clone());
        self.generation += 1;
        trace!(generation = self.generation, "elementary step");
        Ok(())
    }

    fn reset(&mut self) {
        let length = self.state.len();
        self.seed(length);
        debug!("Rule {} automaton reset", self.rule());
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Elementary {
            generation: self.generation,
            rule: self.rule(),
            state: self.state.clone(),
            history: self.history().map(<[u8]>::to_vec).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_seed() {
        let automaton = LinearAutomaton1D::new(11, 30).unwrap();
        assert_eq!(automaton.state(), &[0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(automaton.history_len(), 1);
        assert_eq!(automaton.history().next(), Some(automaton.state()));
    }

    #[test]
    fn test_rule_30_first_step() {
        let mut automaton = LinearAutomaton1D::new(7, 30).unwrap();
        assert_eq!(automaton.state(), &[0, 0, 0, 1, 0, 0, 0]);

        automaton.step().unwrap();
        assert_eq!(automaton.state(), &[0, 0, 1, 1, 1, 0, 0]);

        automaton.step().unwrap();
        assert_eq!(automaton.state(), &[0, 1, 1, 0, 0, 1, 0]);
        assert_eq!(automaton.generation(), 2);
        assert_eq!(automaton.history_len(), 3);
    }

    #[test]
    fn test_periodic_boundary() {
        // Rule 2 copies the right neighbour into each cell: the pattern shifts left
        let mut automaton = LinearAutomaton1D::new(10, 2).unwrap();
        for _ in 0..5 {
            automaton.step().unwrap();
        }
        assert_eq!(automaton.state()[0], 1);

        automaton.step().unwrap();
        assert_eq!(automaton.state()[9], 1);
        assert_eq!(automaton.state().iter().filter(|&&c| c == 1).count(), 1);
    }

    #[test]
    fn test_history_capped_at_200() {
        let mut automaton = LinearAutomaton1D::new(31, 90).unwrap();
        let mut generations = vec![automaton.state().to_vec()];
        for _ in 0..250 {
            automaton.step().unwrap();
            generations.push(automaton.state().to_vec());
        }

        assert_eq!(automaton.history_len(), 200);
        let kept: Vec<Vec<u8>> = automaton.history().map(<[u8]>::to_vec).collect();
        assert_eq!(kept, generations[generations.len() - 200..].to_vec());
    }

    #[test]
    fn test_reset() {
        let mut automaton = LinearAutomaton1D::new(20, 110).unwrap();
        for _ in 0..15 {
            automaton.step().unwrap();
        }
        automaton.reset();

        let mut expected = vec![0; 20];
        expected[10] = 1;
        assert_eq!(automaton.state(), expected.as_slice());
        assert_eq!(automaton.history_len(), 1);
        assert_eq!(automaton.generation(), 0);
        assert_eq!(automaton.rule(), 110);
    }

    #[test]
    fn test_from_config_validation() {
        let config = ElementaryConfig { length: 50, rule: 256 };
        assert!(LinearAutomaton1D::from_config(&config).unwrap_err().is_configuration());

        let config = ElementaryConfig { length: 7, rule: 30 };
        assert!(LinearAutomaton1D::from_config(&config).is_err());

        let config = ElementaryConfig { length: 50, rule: 184 };
        let automaton = LinearAutomaton1D::from_config(&config).unwrap();
        assert_eq!(automaton.len(), 50);
        assert_eq!(automaton.rule_table().rule(), 184);
    }

    #[test]
    fn test_debug_format() {
        let automaton = LinearAutomaton1D::new(10, 30).unwrap();
        assert!(format!("{:?}", automaton).contains("RuleTable"));
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(LinearAutomaton1D::new(0, 30).is_err());
    }

    #[test]
    fn test_single_cell_ring() {
        // Both neighbours of the only cell are itself
        let mut automaton = LinearAutomaton1D::new(1, 0b1000_0000).unwrap();
        automaton.step().unwrap();
        assert_eq!(automaton.state(), &[1]);
    }

    proptest! {
        #[test]
        fn prop_history_bounded_and_state_binary(
            rule in any::<u8>(),
            length in 10usize..64,
            steps in 0usize..260,
        ) {
            let mut automaton = LinearAutomaton1D::new(length, rule).unwrap();
            for _ in 0..steps {
                automaton.step().unwrap();
                prop_assert!(automaton.history_len() <= 200);
                prop_assert_eq!(automaton.len(), length);
            }
            prop_assert!(automaton.state().iter().all(|&c| c <= 1));
            prop_assert_eq!(automaton.history_len(), (steps + 1).min(200));
            prop_assert_eq!(automaton.history().next_back(), Some(automaton.state()));
        }
    }
}
