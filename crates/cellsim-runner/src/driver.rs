//! Timer-driven loop that advances one simulation and reports on it.

use anyhow::Result;
use cellsim_core::{CountsSeries, RunnerConfig};
use cellsim_world::{build_simulation, Simulation, Snapshot};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, instrument};

/// Outcome of a completed or interrupted run
#[derive(Debug)]
pub struct RunSummary {
    pub steps: u64,
    pub interrupted: bool,
    pub snapshot: Snapshot,
    pub series: CountsSeries,
}

pub struct Driver {
    config: RunnerConfig,
    sim: Box<dyn Simulation + Send>,
    series: CountsSeries,
}

impl Driver {
    pub fn new(config: RunnerConfig) -> Result<Self> {
        config.validate()?;
        let sim = build_simulation(&config.simulation, config.seed)?;
        let mut driver = Self {
            config,
            sim,
            series: CountsSeries::new(),
        };
        driver.record();
        Ok(driver)
    }

    /// Epidemic runs keep their per-step counts for later charting
    fn record(&mut self) {
        if let Snapshot::Epidemic { counts, .. } = self.sim.snapshot() {
            self.series.record(counts);
        }
    }

    pub fn step(&mut self) -> Result<()> {
        self.sim.step()?;
        self.record();
        Ok(())
    }

    /// Step until the configured count is reached or `shutdown` resolves
    #[instrument(skip_all, fields(kind = self.config.simulation.kind(), steps = self.config.steps))]
    pub async fn run<F>(mut self, shutdown: F) -> Result<RunSummary>
    where
        F: std::future::Future<Output = ()>,
    {
        info!("Starting {} run for {} steps", self.config.simulation.kind(), self.config.steps);

        let period = Duration::from_millis(self.config.tick_interval_ms.max(1));
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let flat_out = self.config.tick_interval_ms == 0;
        let mut interrupted = false;
        while self.sim.generation() < self.config.steps {
            // Shutdown is checked first; flat-out runs still yield once per step
            let stop = tokio::select! {
                biased;
                _ = &mut shutdown => true,
                _ = ticker.tick(), if !flat_out => false,
                _ = tokio::task::yield_now(), if flat_out => false,
            };
            if stop {
                interrupted = true;
                break;
            }

            self.step()?;

            let generation = self.sim.generation();
            if generation % self.config.log_every == 0 {
                self.log_progress();
            } else {
                debug!(generation, "step complete");
            }
        }

        if interrupted {
            info!("Run interrupted at step {}", self.sim.generation());
        }
        self.emit_summary();

        Ok(RunSummary {
            steps: self.sim.generation(),
            interrupted,
            snapshot: self.sim.snapshot(),
            series: self.series,
        })
    }

    fn log_progress(&self) {
        match self.sim.snapshot() {
            Snapshot::Life { generation, alive, .. } => {
                info!(generation, alive, "life progress");
            }
            Snapshot::Elementary { generation, state, .. } => {
                let alive = state.iter().filter(|&&c| c == 1).count();
                info!(generation, alive, "elementary progress");
            }
            Snapshot::Epidemic { t, counts, .. } => {
                info!(
                    t,
                    susceptible = counts.susceptible,
                    infected = counts.infected,
                    recovered = counts.recovered,
                    dead = counts.dead,
                    "epidemic progress"
                );
            }
        }
    }

    fn emit_summary(&self) {
        info!("Run finished after {} steps", self.sim.generation());
        if let Some((step, infected)) = self.series.peak_infected() {
            info!(step, infected, "Peak infection");
        }
        if let Some(latest) = self.series.latest() {
            for (state, population) in latest.iter() {
                info!("  {}: {}", state, population);
            }
        }
    }
}
