//! The case pool: one generated set of ranked cases.
//!
//! A `CasePool` can only be built through `CasePool::new`, which checks the
//! shape the game relies on: exactly `pool_size` cases, case numbers
//! `1..=pool_size` with no gaps, tiers a permutation of `1..=pool_size`.
//! Everything else in this module is a pure query over the pool and a
//! caller-supplied `OpenedCases`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::opened::OpenedCases;
use crate::core::{Case, CaseNumber, PrizeId, Slot, Tier};

/// Malformed pool data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("expected {expected} cases, got {got}")]
    WrongSize { expected: usize, got: usize },
    #[error("case number {0} is out of range")]
    CaseOutOfRange(u8),
    #[error("case number {0} appears twice")]
    DuplicateCase(u8),
    #[error("tier {0} is out of range")]
    TierOutOfRange(u8),
    #[error("tier {0} appears twice")]
    DuplicateTier(u8),
    #[error("prize {0} appears twice")]
    DuplicatePrize(u64),
}

/// A validated pool of cases for one roster slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PoolParts")]
pub struct CasePool {
    season: String,
    seed: u64,
    slot: Slot,
    /// Sorted by case number; `cases[i].number == i + 1`.
    cases: Vec<Case>,
}

/// Unchecked serialized form; deserializing goes through `CasePool::new`.
#[derive(Deserialize)]
struct PoolParts {
    season: String,
    seed: u64,
    slot: Slot,
    cases: Vec<Case>,
}

impl TryFrom<PoolParts> for CasePool {
    type Error = PoolError;

    fn try_from(parts: PoolParts) -> Result<Self, Self::Error> {
        let pool_size = parts.cases.len();
        CasePool::new(parts.season, parts.seed, parts.slot, parts.cases, pool_size)
    }
}

impl CasePool {
    /// Validate and build a pool.
    pub fn new(
        season: impl Into<String>,
        seed: u64,
        slot: Slot,
        mut cases: Vec<Case>,
        pool_size: usize,
    ) -> Result<Self, PoolError> {
        if cases.len() != pool_size {
            return Err(PoolError::WrongSize {
                expected: pool_size,
                got: cases.len(),
            });
        }

        let mut numbers = vec![false; pool_size];
        let mut tiers = vec![false; pool_size];
        let mut prizes = FxHashSet::default();
        for case in &cases {
            let n = case.number.raw();
            let seen = (n as usize)
                .checked_sub(1)
                .and_then(|i| numbers.get_mut(i))
                .ok_or(PoolError::CaseOutOfRange(n))?;
            if std::mem::replace(seen, true) {
                return Err(PoolError::DuplicateCase(n));
            }

            let t = case.tier.raw();
            let seen = (t as usize)
                .checked_sub(1)
                .and_then(|i| tiers.get_mut(i))
                .ok_or(PoolError::TierOutOfRange(t))?;
            if std::mem::replace(seen, true) {
                return Err(PoolError::DuplicateTier(t));
            }

            if !prizes.insert(case.prize.id) {
                return Err(PoolError::DuplicatePrize(case.prize.id.raw()));
            }
        }

        cases.sort_by_key(|c| c.number);
        Ok(Self {
            season: season.into(),
            seed,
            slot,
            cases,
        })
    }

    /// Generation label (the season the pool was drawn from).
    #[must_use]
    pub fn season(&self) -> &str {
        &self.season
    }

    /// Seed the generator used.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Slot this pool is played for.
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True for an empty pool (only possible with `pool_size == 0`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Look up a case by number.
    #[must_use]
    pub fn get(&self, number: CaseNumber) -> Option<&Case> {
        (number.raw() as usize)
            .checked_sub(1)
            .and_then(|i| self.cases.get(i))
    }

    /// Does the pool hold this case number?
    #[must_use]
    pub fn contains(&self, number: CaseNumber) -> bool {
        self.get(number).is_some()
    }

    /// All cases sorted by case number (the selection grid).
    #[must_use]
    pub fn cases_by_number(&self) -> &[Case] {
        &self.cases
    }

    /// All cases sorted ascending by tier (the reveal board).
    #[must_use]
    pub fn cases_by_tier(&self) -> Vec<&Case> {
        let mut by_tier: Vec<&Case> = self.cases.iter().collect();
        by_tier.sort_by_key(|c| c.tier);
        by_tier
    }

    /// Cases not yet opened, in case order.
    pub fn unopened_cases<'a>(
        &'a self,
        opened: &'a OpenedCases,
    ) -> impl Iterator<Item = &'a Case> + 'a {
        self.cases.iter().filter(move |c| !opened.contains(c.number))
    }

    /// Tiers of the cases not yet opened.
    pub fn unopened_tiers<'a>(
        &'a self,
        opened: &'a OpenedCases,
    ) -> impl Iterator<Item = Tier> + 'a {
        self.unopened_cases(opened).map(|c| c.tier)
    }

    /// The one case that is neither opened nor reserved.
    ///
    /// Defined only when exactly one such case exists.
    #[must_use]
    pub fn other_unopened_case<'a>(
        &'a self,
        opened: &'a OpenedCases,
        reserved: CaseNumber,
    ) -> Option<&'a Case> {
        let mut others = self
            .unopened_cases(opened)
            .filter(|c| c.number != reserved);
        match (others.next(), others.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Identities of every prize in the pool, opened or not.
    #[must_use]
    pub fn prize_ids(&self) -> FxHashSet<PrizeId> {
        self.cases.iter().map(|c| c.prize.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Prize, DEFAULT_POOL_SIZE};

    fn case(number: u8, tier: u8) -> Case {
        let prize = Prize::new(PrizeId::new(1000 + number as u64), format!("P{number}"), "TM");
        Case::new(CaseNumber::new(number), Tier::new(tier), prize, 10.0)
    }

    /// Case N holds tier 17 - N, shuffled into an arbitrary order.
    fn pool() -> CasePool {
        let mut cases: Vec<_> = (1..=16).map(|n| case(n, 17 - n)).collect();
        cases.reverse();
        CasePool::new("2024-25", 7, Slot::PG, cases, DEFAULT_POOL_SIZE).unwrap()
    }

    #[test]
    fn test_new_sorts_by_number() {
        let pool = pool();
        let numbers: Vec<_> = pool.cases_by_number().iter().map(|c| c.number.raw()).collect();
        assert_eq!(numbers, (1..=16).collect::<Vec<_>>());
        assert_eq!(pool.season(), "2024-25");
        assert_eq!(pool.seed(), 7);
        assert_eq!(pool.slot(), Slot::PG);
    }

    #[test]
    fn test_cases_by_tier() {
        let pool = pool();
        let tiers: Vec<_> = pool.cases_by_tier().iter().map(|c| c.tier.raw()).collect();
        assert_eq!(tiers, (1..=16).collect::<Vec<_>>());
        assert_eq!(pool.cases_by_tier()[0].number, CaseNumber::new(16));
    }

    #[test]
    fn test_wrong_size() {
        let cases: Vec<_> = (1..=15).map(|n| case(n, n)).collect();
        let err = CasePool::new("s", 1, Slot::C, cases, 16).unwrap_err();
        assert_eq!(err, PoolError::WrongSize { expected: 16, got: 15 });
    }

    #[test]
    fn test_duplicate_case_and_tier() {
        let mut cases: Vec<_> = (1..=16).map(|n| case(n, n)).collect();
        cases[15] = case(15, 16);
        let err = CasePool::new("s", 1, Slot::C, cases, 16).unwrap_err();
        assert_eq!(err, PoolError::DuplicateCase(15));

        let mut cases: Vec<_> = (1..=16).map(|n| case(n, n)).collect();
        cases[15] = case(16, 1);
        let err = CasePool::new("s", 1, Slot::C, cases, 16).unwrap_err();
        assert_eq!(err, PoolError::DuplicateTier(1));
    }

    #[test]
    fn test_out_of_range() {
        let mut cases: Vec<_> = (1..=16).map(|n| case(n, n)).collect();
        cases[0] = case(0, 1);
        let err = CasePool::new("s", 1, Slot::C, cases, 16).unwrap_err();
        assert_eq!(err, PoolError::CaseOutOfRange(0));

        let mut cases: Vec<_> = (1..=16).map(|n| case(n, n)).collect();
        cases[0] = case(1, 17);
        let err = CasePool::new("s", 1, Slot::C, cases, 16).unwrap_err();
        assert_eq!(err, PoolError::TierOutOfRange(17));
    }

    #[test]
    fn test_duplicate_prize() {
        let mut cases: Vec<_> = (1..=16).map(|n| case(n, n)).collect();
        cases[1].prize = cases[0].prize.clone();
        let err = CasePool::new("s", 1, Slot::C, cases, 16).unwrap_err();
        assert_eq!(err, PoolError::DuplicatePrize(1001));
    }

    #[test]
    fn test_get_and_contains() {
        let pool = pool();
        assert_eq!(pool.get(CaseNumber::new(3)).map(|c| c.tier), Some(Tier::new(14)));
        assert!(pool.contains(CaseNumber::new(16)));
        assert!(!pool.contains(CaseNumber::new(0)));
        assert!(!pool.contains(CaseNumber::new(17)));
    }

    #[test]
    fn test_unopened_cases() {
        let pool = pool();
        let opened: OpenedCases = [1, 2, 3].into_iter().map(CaseNumber::new).collect();

        let unopened: Vec<_> = pool.unopened_cases(&opened).map(|c| c.number.raw()).collect();
        assert_eq!(unopened, (4..=16).collect::<Vec<_>>());
        assert_eq!(pool.unopened_tiers(&opened).count(), 13);
    }

    #[test]
    fn test_other_unopened_case_partial() {
        let pool = pool();
        let reserved = CaseNumber::new(8);

        let opened: OpenedCases = (1..=16)
            .filter(|&n| n != 8 && n != 11)
            .map(CaseNumber::new)
            .collect();
        let other = pool.other_unopened_case(&opened, reserved);
        assert_eq!(other.map(|c| c.number), Some(CaseNumber::new(11)));

        // Two alternatives left: undefined.
        let opened: OpenedCases = (1..=13)
            .filter(|&n| n != 8)
            .map(CaseNumber::new)
            .collect();
        assert!(pool.other_unopened_case(&opened, reserved).is_none());

        // Nothing but the reserved case left: undefined.
        let opened: OpenedCases = (1..=16)
            .filter(|&n| n != 8)
            .map(CaseNumber::new)
            .collect();
        assert!(pool.other_unopened_case(&opened, reserved).is_none());
    }

    #[test]
    fn test_deserialize_sorts_cases() {
        let mut value = serde_json::to_value(pool()).unwrap();
        value["cases"].as_array_mut().unwrap().reverse();

        let restored: CasePool = serde_json::from_value(value).unwrap();
        assert_eq!(restored, pool());
        let first = restored.get(CaseNumber::new(1));
        assert_eq!(first.map(|c| c.tier), Some(Tier::new(16)));
    }

    #[test]
    fn test_deserialize_rejects_malformed_pool() {
        let mut value = serde_json::to_value(pool()).unwrap();
        value["cases"][1]["number"] = serde_json::json!(1);
        let err = serde_json::from_value::<CasePool>(value).unwrap_err();
        assert!(err.to_string().contains("appears twice"), "{err}");

        let mut value = serde_json::to_value(pool()).unwrap();
        value["cases"][0]["tier"] = serde_json::json!(40);
        assert!(serde_json::from_value::<CasePool>(value).is_err());
    }

    #[test]
    fn test_prize_ids() {
        let pool = pool();
        let ids = pool.prize_ids();
        assert_eq!(ids.len(), 16);
        assert!(ids.contains(&PrizeId::new(1001)));
    }
}
