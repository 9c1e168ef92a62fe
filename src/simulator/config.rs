//! Simulation configuration.

use crate::content::starters::Starter;
use crate::core::config::RunConfig;

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs to play
    pub num_runs: u32,

    /// Base seed; run `i` uses `seed + i` (None = entropy)
    pub seed: Option<u64>,

    /// Starter every run begins with
    pub starter: Starter,

    /// Map and reward tuning for each run
    pub run: RunConfig,

    /// Safety cap on battle turns per run
    pub max_turns_per_run: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            starter: Starter::Fire,
            run: RunConfig::default(),
            max_turns_per_run: 2_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small batch for a quick balance check.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 100,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Every ordinary floor is a fight.
    pub fn gauntlet(num_runs: u32, floor_count: u32) -> Self {
        Self {
            num_runs,
            run: RunConfig::gauntlet(floor_count),
            ..Default::default()
        }
    }

    pub fn with_floors(mut self, floor_count: u32) -> Self {
        self.run.floor_count = floor_count;
        self
    }
}
