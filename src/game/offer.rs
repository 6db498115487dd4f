//! Banker offers and how they are requested.
//!
//! The banker is an external service. The game decides what to ask for:
//! a target tier (the rounded mean of the tiers still in play), a seed that
//! is stable per round, and the prizes the banker must not offer.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Prize, PrizeId, Slot, Tier};

/// An offer returned by the banker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankerOffer {
    /// Tier the game asked for.
    pub target_tier: Tier,
    /// Tier the banker actually drew from. May differ from the target.
    pub picked_tier: Tier,
    /// The prize on the table.
    pub prize: Prize,
}

/// Everything the banker needs to produce an offer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfferRequest {
    pub slot: Slot,
    pub target_tier: Tier,
    pub seed: u64,
    /// Prizes already visible in the pool.
    pub exclude: FxHashSet<PrizeId>,
}

impl OfferRequest {
    /// Excluded prize ids in ascending order, for stable wire encoding.
    #[must_use]
    pub fn excluded_sorted(&self) -> Vec<PrizeId> {
        let mut ids: Vec<_> = self.exclude.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Derive the target tier from the tiers still in play.
///
/// Mean of `tiers`, rounded half away from zero, clamped to `[min, max]`.
/// Swapped bounds are normalised.
/// Returns `None` when there is nothing to average.
///
/// ```
/// use deal_draft::core::Tier;
/// use deal_draft::game::target_tier;
///
/// let tiers = (5..=16).map(Tier::new);
/// assert_eq!(target_tier(tiers, Tier::new(1), Tier::new(16)), Some(Tier::new(11)));
/// ```
pub fn target_tier(
    tiers: impl IntoIterator<Item = Tier>,
    min: Tier,
    max: Tier,
) -> Option<Tier> {
    let (sum, count) = tiers
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), tier| (sum + tier.raw() as u64, count + 1));
    if count == 0 {
        return None;
    }

    // floor(sum / count + 1/2) in integers; tiers are positive.
    let rounded = (2 * sum + count) / (2 * count);
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let clamped = rounded.clamp(lo.raw() as u64, hi.raw() as u64);
    Some(Tier::new(clamped as u8))
}

/// Per-round request seed: `base * 100 + round + 1`.
///
/// Distinct across the rounds of one pool and across base seeds.
#[must_use]
pub fn request_seed(base: u64, round: usize) -> u64 {
    base.wrapping_mul(100).wrapping_add(round as u64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers(values: &[u8]) -> Vec<Tier> {
        values.iter().copied().map(Tier::new).collect()
    }

    const MIN: Tier = Tier::new(1);
    const MAX: Tier = Tier::new(16);

    #[test]
    fn test_target_tier_exact_mean() {
        assert_eq!(target_tier(tiers(&[2, 4, 6]), MIN, MAX), Some(Tier::new(4)));
    }

    #[test]
    fn test_target_tier_rounds_half_up() {
        // 10.5 -> 11
        let t: Vec<_> = (5..=16).map(Tier::new).collect();
        assert_eq!(target_tier(t, MIN, MAX), Some(Tier::new(11)));

        // 1.5 -> 2
        assert_eq!(target_tier(tiers(&[1, 2]), MIN, MAX), Some(Tier::new(2)));
    }

    #[test]
    fn test_target_tier_rounds_down_below_half() {
        // 7 / 3 = 2.33 -> 2
        assert_eq!(target_tier(tiers(&[1, 2, 4]), MIN, MAX), Some(Tier::new(2)));
        // 8 / 3 = 2.67 -> 3
        assert_eq!(target_tier(tiers(&[1, 3, 4]), MIN, MAX), Some(Tier::new(3)));
    }

    #[test]
    fn test_target_tier_empty() {
        assert_eq!(target_tier(Vec::new(), MIN, MAX), None);
    }

    #[test]
    fn test_target_tier_clamps() {
        assert_eq!(target_tier(tiers(&[40, 40]), MIN, MAX), Some(MAX));
        assert_eq!(
            target_tier(tiers(&[1, 2]), Tier::new(5), MAX),
            Some(Tier::new(5))
        );
    }

    #[test]
    fn test_target_tier_swapped_bounds() {
        assert_eq!(target_tier(tiers(&[5]), MAX, MIN), Some(Tier::new(5)));
        assert_eq!(target_tier(tiers(&[1]), MAX, Tier::new(4)), Some(Tier::new(4)));
    }

    #[test]
    fn test_request_seed() {
        assert_eq!(request_seed(7, 0), 701);
        assert_eq!(request_seed(7, 4), 705);
        assert_ne!(request_seed(7, 0), request_seed(8, 0));
        assert_eq!(request_seed(u64::MAX, 0), u64::MAX.wrapping_mul(100).wrapping_add(1));
    }

    #[test]
    fn test_excluded_sorted() {
        let request = OfferRequest {
            slot: Slot::PG,
            target_tier: Tier::new(8),
            seed: 1,
            exclude: [PrizeId::new(9), PrizeId::new(2), PrizeId::new(5)]
                .into_iter()
                .collect(),
        };
        assert_eq!(
            request.excluded_sorted(),
            vec![PrizeId::new(2), PrizeId::new(5), PrizeId::new(9)]
        );
    }
}
