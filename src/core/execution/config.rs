//! Configuration for a curing line simulation
//!
//! Defaults reproduce the reference plant: 24 curing cavities, a tire built
//! every 30 ± 3 seconds, 12 minutes ± 60 seconds of curing and 20 seconds of
//! inspection.

use crate::core::errors::{SimError, SimResult};
use crate::core::timing::TimingWindow;
use crate::core::types::SimTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CAVITIES: usize = 24;
pub const DEFAULT_INSPECTION_SECONDS: SimTime = 20.0;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    /// Number of curing cavities
    pub pool_capacity: usize,
    /// Interval between two built tires
    pub build: TimingWindow,
    /// Time a tire spends in a cavity
    pub cure: TimingWindow,
    /// Fixed time spent in the finishing area
    pub inspection_duration: SimTime,
    /// Seed for `SimulationEngine::seeded`
    pub seed: u64,
}

impl LineConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    /// `InvalidConfiguration` when a spread exceeds its mean, a value is
    /// negative or not finite, or there are no cavities.
    pub fn new(
        pool_capacity: usize,
        build_mean: SimTime,
        build_spread: SimTime,
        cure_mean: SimTime,
        cure_spread: SimTime,
    ) -> SimResult<Self> {
        let config = Self {
            pool_capacity,
            build: TimingWindow {
                mean: build_mean,
                spread: build_spread,
            },
            cure: TimingWindow {
                mean: cure_mean,
                spread: cure_spread,
            },
            inspection_duration: DEFAULT_INSPECTION_SECONDS,
            seed: DEFAULT_SEED,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the fixed inspection time in the finishing area
    pub fn with_inspection_duration(mut self, seconds: SimTime) -> Self {
        self.inspection_duration = seconds;
        self
    }

    /// Set the seed used by `SimulationEngine::seeded`
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.pool_capacity == 0 {
            return Err(SimError::InvalidConfiguration(
                "pool capacity must be at least 1".to_string(),
            ));
        }
        self.build.validate("build interval")?;
        if self.build.mean == 0.0 {
            return Err(SimError::InvalidConfiguration(
                "build interval mean must be positive".to_string(),
            ));
        }
        self.cure.validate("cure duration")?;
        if !self.inspection_duration.is_finite() || self.inspection_duration < 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "inspection duration must be finite and non-negative, got {}",
                self.inspection_duration
            )));
        }
        Ok(())
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_CAVITIES,
            build: TimingWindow {
                mean: 30.0,
                spread: 3.0,
            },
            cure: TimingWindow {
                mean: 720.0,
                spread: 60.0,
            },
            inspection_duration: DEFAULT_INSPECTION_SECONDS,
            seed: DEFAULT_SEED,
        }
    }
}
