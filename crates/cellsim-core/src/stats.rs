//! Aggregate time-series tracking for the epidemic model.

use crate::{HealthState, PopulationCounts};
use serde::{Deserialize, Serialize};

/// Population counts recorded once per step, starting with the initial grid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountsSeries {
    entries: Vec<PopulationCounts>,
}

impl CountsSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, counts: PopulationCounts) {
        self.entries.push(counts);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&PopulationCounts> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[PopulationCounts] {
        &self.entries
    }

    /// Population of one state over time, suitable for plotting
    pub fn series(&self, state: HealthState) -> Vec<usize> {
        self.entries.iter().map(|counts| counts[state]).collect()
    }

    /// Step index and size of the largest infected population seen.
    /// Ties resolve to the earliest step.
    pub fn peak_infected(&self) -> Option<(usize, usize)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(step, counts)| (step, counts.infected))
            .fold(None, |best, (step, infected)| match best {
                Some((_, peak)) if peak >= infected => best,
                _ => Some((step, infected)),
            })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(susceptible: usize, infected: usize, recovered: usize) -> PopulationCounts {
        PopulationCounts {
            susceptible,
            infected,
            recovered,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_series() {
        let series = CountsSeries::new();
        assert!(series.is_empty());
        assert_eq!(series.latest(), None);
        assert_eq!(series.peak_infected(), None);
    }

    #[test]
    fn test_series_per_state() {
        let mut series = CountsSeries::new();
        series.record(counts(9, 1, 0));
        series.record(counts(7, 3, 0));
        series.record(counts(6, 2, 2));

        assert_eq!(series.len(), 3);
        assert_eq!(series.series(HealthState::Infected), vec![1, 3, 2]);
        assert_eq!(series.series(HealthState::Recovered), vec![0, 0, 2]);
        assert_eq!(series.latest(), Some(&counts(6, 2, 2)));
    }

    #[test]
    fn test_peak_infected_prefers_earliest() {
        let mut series = CountsSeries::new();
        series.record(counts(9, 1, 0));
        series.record(counts(6, 4, 0));
        series.record(counts(2, 4, 4));
        series.record(counts(2, 1, 7));

        assert_eq!(series.peak_infected(), Some((1, 4)));

        series.clear();
        assert!(series.is_empty());
    }
}
