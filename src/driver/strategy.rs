//! Automatic players.
//!
//! A `Strategy` answers the decisions a play-through asks for: which case to
//! reserve, which case to open next, whether to take the banker's offer and
//! whether to switch at the end.
//! - `Threshold`: deterministic, deals once an offer is good enough
//! - `RandomPlayer`: seeded coin flips, for soak tests and benchmarks

use crate::core::{CaseNumber, GameRng, Tier};
use crate::game::{BankerOffer, GameMachine};
use crate::pool::CasePool;

/// Decision policy for a play-through.
pub trait Strategy {
    /// Case to reserve from a fresh pool.
    fn reserve(&mut self, pool: &CasePool) -> CaseNumber;

    /// Next case to open. `None` if nothing can be opened.
    fn next_open(&mut self, machine: &GameMachine) -> Option<CaseNumber> {
        let reserved = machine.reserved();
        machine
            .remaining_cases()
            .into_iter()
            .map(|case| case.number)
            .find(|&number| Some(number) != reserved)
    }

    /// Take the offer on the table?
    fn take_deal(&mut self, offer: &BankerOffer, machine: &GameMachine) -> bool;

    /// Switch to the other case at the final choice?
    fn switch(&mut self, machine: &GameMachine) -> bool;
}

/// Reserve a fixed case, open in case order, deal once the banker offers
/// `deal_at` or better.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Threshold {
    pub reserve: CaseNumber,
    /// Worst tier worth dealing for. `None` never deals.
    pub deal_at: Option<Tier>,
    pub switch: bool,
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            reserve: CaseNumber::new(1),
            deal_at: None,
            switch: false,
        }
    }
}

impl Threshold {
    #[must_use]
    pub fn with_deal_at(mut self, tier: Tier) -> Self {
        self.deal_at = Some(tier);
        self
    }

    #[must_use]
    pub fn with_switch(mut self, switch: bool) -> Self {
        self.switch = switch;
        self
    }

    #[must_use]
    pub fn with_reserve(mut self, case: CaseNumber) -> Self {
        self.reserve = case;
        self
    }
}

impl Strategy for Threshold {
    fn reserve(&mut self, pool: &CasePool) -> CaseNumber {
        if pool.contains(self.reserve) {
            self.reserve
        } else {
            CaseNumber::new(1)
        }
    }

    fn take_deal(&mut self, offer: &BankerOffer, _machine: &GameMachine) -> bool {
        self.deal_at.is_some_and(|tier| offer.picked_tier <= tier)
    }

    fn switch(&mut self, _machine: &GameMachine) -> bool {
        self.switch
    }
}

/// Seeded random decisions.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
    /// Chance of taking any given offer, in percent.
    deal_percent: usize,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("player"),
            deal_percent: 20,
        }
    }

    #[must_use]
    pub fn with_deal_percent(mut self, percent: usize) -> Self {
        self.deal_percent = percent.min(100);
        self
    }

    fn roll(&mut self, percent: usize) -> bool {
        self.rng.gen_range_usize(0..100) < percent
    }
}

impl Strategy for RandomPlayer {
    fn reserve(&mut self, pool: &CasePool) -> CaseNumber {
        self.rng
            .choose(pool.cases_by_number())
            .map_or(CaseNumber::new(1), |case| case.number)
    }

    fn next_open(&mut self, machine: &GameMachine) -> Option<CaseNumber> {
        let reserved = machine.reserved();
        let candidates: Vec<CaseNumber> = machine
            .remaining_cases()
            .into_iter()
            .map(|case| case.number)
            .filter(|&number| Some(number) != reserved)
            .collect();
        self.rng.choose(&candidates).copied()
    }

    fn take_deal(&mut self, _offer: &BankerOffer, _machine: &GameMachine) -> bool {
        let percent = self.deal_percent;
        self.roll(percent)
    }

    fn switch(&mut self, _machine: &GameMachine) -> bool {
        self.roll(50)
    }
}
