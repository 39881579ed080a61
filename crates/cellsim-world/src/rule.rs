//! Elementary automaton transition tables.

use serde::{Deserialize, Serialize};

/// A (left, centre, right) neighbourhood of binary cells
pub type Neighbourhood = (u8, u8, u8);

/// Neighbourhoods in table order. Entry `i` takes its output from bit `7 - i`
/// of the rule code.
pub const NEIGHBOURHOODS: [Neighbourhood; 8] = [
    (1, 1, 1),
    (1, 1, 0),
    (1, 0, 1),
    (1, 0, 0),
    (0, 1, 1),
    (0, 1, 0),
    (0, 0, 1),
    (0, 0, 0),
];

/// Immutable 8-entry lookup built once from a rule code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    rule: u8,
    outputs: [u8; 8],
}

impl RuleTable {
    pub fn new(rule: u8) -> Self {
        let mut outputs = [0u8; 8];
        for (i, output) in outputs.iter_mut().enumerate() {
            *output = (rule >> (7 - i)) & 1;
        }
        Self { rule, outputs }
    }

    pub fn rule(&self) -> u8 {
        self.rule
    }

    /// Output for a neighbourhood. Cells must be 0 or 1.
    pub fn lookup(&self, (left, centre, right): Neighbourhood) -> u8 {
        debug_assert!(left <= 1 && centre <= 1 && right <= 1);
        // (1,1,1) is entry 0 and (0,0,0) is entry 7
        let index = 7 - ((left << 2) | (centre << 1) | right) as usize;
        self.outputs[index]
    }

    /// (neighbourhood, output) pairs in table order
    pub fn entries(&self) -> impl Iterator<Item = (Neighbourhood, u8)> + '_ {
        NEIGHBOURHOODS.into_iter().zip(self.outputs)
    }
}
