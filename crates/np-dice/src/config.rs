//! Configuration for rolling.

use crate::dice::{DEFAULT_SUCCESS_THRESHOLD, SIDES};
use crate::error::{DiceError, DiceResult};
use crate::stats::PoolSize;

/// Default upper bound on a final pool size.
pub const DEFAULT_MAX_POOL: i32 = 50;

/// Settings applied to every roll made with this configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollConfig {
    /// Value a die must meet or exceed to count as a success (1-10).
    pub success_threshold: u32,
    /// Largest final pool a caller may roll.
    pub max_pool: i32,
    /// RNG seed for reproducible rolls. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
            max_pool: DEFAULT_MAX_POOL,
            seed: None,
        }
    }
}

impl RollConfig {
    /// Set the success threshold (clamped to 1-10).
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.success_threshold = threshold.clamp(1, SIDES);
        self
    }

    /// Set the maximum pool size (at least 1).
    pub fn with_max_pool(mut self, max_pool: i32) -> Self {
        self.max_pool = max_pool.max(1);
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject pools larger than `max_pool`.
    pub fn check_pool(&self, size: PoolSize) -> DiceResult<()> {
        if size.final_pool > self.max_pool {
            return Err(DiceError::PoolTooLarge {
                pool: size.final_pool,
                max: self.max_pool,
            });
        }
        Ok(())
    }
}
