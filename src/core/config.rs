//! Game configuration.
//!
//! `GameConfig` fixes the shape of a play-through:
//! - `pool_size`: how many cases a pool holds
//! - `schedule`: how many cases are opened in each round
//! - `tier_bounds`: the closed range banker target tiers are clamped to
//!
//! The defaults describe the standard 16-case game. Every schedule must leave
//! exactly two cases unopened (the reserved one and one other) after the last
//! round, which `validate()` checks.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::case::Tier;

/// Default number of cases in a pool.
pub const DEFAULT_POOL_SIZE: usize = 16;

/// Default opening schedule: cases opened per round.
pub const DEFAULT_SCHEDULE: [u8; 5] = [4, 3, 3, 2, 2];

/// Opening schedule. Inline up to 8 rounds.
pub type Schedule = SmallVec<[u8; 8]>;

/// Configuration errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("opening schedule is empty")]
    EmptySchedule,
    #[error("round {round} opens no cases")]
    EmptyRound { round: usize },
    #[error("schedule opens {opened} cases but a pool of {pool_size} needs {expected}")]
    ScheduleMismatch {
        opened: usize,
        pool_size: usize,
        expected: usize,
    },
    #[error("tier bounds {min}..={max} are invalid for a pool of {pool_size}")]
    TierBounds { min: u8, max: u8, pool_size: usize },
    #[error("pool size {0} is out of range (3..=255)")]
    PoolSize(usize),
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of cases per pool.
    pub pool_size: usize,

    /// Cases opened per round, in order.
    pub schedule: Schedule,

    /// Lowest tier a banker target may take.
    pub min_tier: Tier,

    /// Highest tier a banker target may take.
    pub max_tier: Tier,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            schedule: SmallVec::from_slice(&DEFAULT_SCHEDULE),
            min_tier: Tier::new(1),
            max_tier: Tier::new(DEFAULT_POOL_SIZE as u8),
        }
    }
}

impl GameConfig {
    /// Create a configuration for a pool of `pool_size` cases.
    ///
    /// The schedule defaults to a single round that leaves two cases; call
    /// `with_schedule` to split it.
    pub fn new(pool_size: usize) -> Self {
        let opened = pool_size.saturating_sub(2).min(u8::MAX as usize) as u8;
        Self {
            pool_size,
            schedule: smallvec![opened],
            min_tier: Tier::new(1),
            max_tier: Tier::new(pool_size.min(u8::MAX as usize) as u8),
        }
    }

    /// Set the opening schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: &[u8]) -> Self {
        self.schedule = SmallVec::from_slice(schedule);
        self
    }

    /// Set the tier clamp bounds.
    #[must_use]
    pub fn with_tier_bounds(mut self, min: Tier, max: Tier) -> Self {
        self.min_tier = min;
        self.max_tier = max;
        self
    }

    /// Number of rounds.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.schedule.len()
    }

    /// Cases to open in `round` (0-based), if that round exists.
    #[must_use]
    pub fn batch(&self, round: usize) -> Option<u8> {
        self.schedule.get(round).copied()
    }

    /// Is `round` the last scheduled round?
    #[must_use]
    pub fn is_last_round(&self, round: usize) -> bool {
        round + 1 >= self.schedule.len()
    }

    /// Total cases opened across all rounds.
    #[must_use]
    pub fn total_opened(&self) -> usize {
        self.schedule.iter().map(|&n| n as usize).sum()
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(3..=u8::MAX as usize).contains(&self.pool_size) {
            return Err(ConfigError::PoolSize(self.pool_size));
        }
        if self.schedule.is_empty() {
            return Err(ConfigError::EmptySchedule);
        }
        if let Some(round) = self.schedule.iter().position(|&n| n == 0) {
            return Err(ConfigError::EmptyRound { round });
        }

        // Reserved case plus exactly one other must survive the last round.
        let expected = self.pool_size - 2;
        let opened = self.total_opened();
        if opened != expected {
            return Err(ConfigError::ScheduleMismatch {
                opened,
                pool_size: self.pool_size,
                expected,
            });
        }

        let (min, max) = (self.min_tier.raw(), self.max_tier.raw());
        if min == 0 || min > max || max as usize > self.pool_size {
            return Err(ConfigError::TierBounds {
                min,
                max,
                pool_size: self.pool_size,
            });
        }

        Ok(())
    }
}
