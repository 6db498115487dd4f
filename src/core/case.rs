//! Cases - numbered containers, each holding one ranked prize.
//!
//! `CaseNumber` is what the player points at. `Tier` is the hidden rank
//! (1 = best) that the banker reasons about. A `Case` is created by the
//! pool generator and never mutated; whether it has been opened is tracked
//! by the game machine, not here.

use serde::{Deserialize, Serialize};

use super::prize::Prize;

/// Case number as shown to the player (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseNumber(pub u8);

impl CaseNumber {
    /// Create a new case number.
    #[must_use]
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Get the raw number.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Case #{}", self.0)
    }
}

/// Prize rank within a pool. Tier 1 holds the best prize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tier(pub u8);

impl Tier {
    /// Create a new tier.
    #[must_use]
    pub const fn new(tier: u8) -> Self {
        Self(tier)
    }

    /// Get the raw tier value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tier {}", self.0)
    }
}

/// A single case in a pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub number: CaseNumber,
    pub tier: Tier,
    pub prize: Prize,
    /// Production score of the prize. Display only.
    pub score: f64,
}

impl Case {
    /// Create a new case.
    #[must_use]
    pub fn new(number: CaseNumber, tier: Tier, prize: Prize, score: f64) -> Self {
        Self {
            number,
            tier,
            prize,
            score,
        }
    }
}
