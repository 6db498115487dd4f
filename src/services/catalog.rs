//! In-process player catalog and the backend built on it.
//!
//! `Catalog` holds per-game stat lines for a season and reproduces the game
//! backend's algorithms without a network hop:
//!
//! - **Pools**: candidates for a slot are ranked by production score and cut
//!   into `pool_size` tiers by rank; one player is drawn from each tier and
//!   the draws are shuffled into case numbers.
//! - **Offers**: the banker draws from the target tier, skipping excluded
//!   prizes, and widens to neighbouring tiers (nearest first, lower tier
//!   first on ties) when a tier has nothing left.
//! - **Search**: case-insensitive substring match on the name, active
//!   players first.
//!
//! Pools and offers are seeded through `GameRng` contexts (`"pool"` and
//! `"offer"`), so the same inputs always give the same results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{Result, ServiceError};
use super::{OfferGenerator, PlayerSearch, PoolGenerator};
use crate::core::{Case, CaseNumber, GameRng, Prize, PrizeId, Slot, Tier, DEFAULT_POOL_SIZE};
use crate::game::{BankerOffer, OfferRequest};
use crate::pool::CasePool;

/// Season the bundled catalog describes.
pub const DEMO_SEASON: &str = "2024-25";

/// Upper bound on search results.
pub const MAX_SEARCH_LIMIT: usize = 25;

/// Per-game averages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
}

impl StatLine {
    /// Single-number production used for tiering.
    ///
    /// ```
    /// use deal_draft::services::StatLine;
    ///
    /// let line = StatLine { pts: 20.0, reb: 5.0, ast: 4.0, stl: 1.0, blk: 0.5, tov: 2.0 };
    /// assert!((line.production_score() - 32.5).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn production_score(&self) -> f64 {
        self.pts + 1.2 * self.reb + 1.5 * self.ast + 3.0 * self.stl + 3.0 * self.blk
            - 2.0 * self.tov
    }
}

/// A player the catalog can put in a case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub prize: Prize,
    /// Roster position as listed by the team ("G", "F-C", ...).
    pub position: String,
    pub stats: StatLine,
    pub active: bool,
}

impl Candidate {
    #[must_use]
    pub fn slot(&self) -> Slot {
        Slot::from_roster_position(&self.position)
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.stats.production_score()
    }
}

/// A season's worth of candidates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    season: String,
    candidates: Vec<Candidate>,
}

impl Catalog {
    pub fn new(season: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        Self {
            season: season.into(),
            candidates,
        }
    }

    #[must_use]
    pub fn season(&self) -> &str {
        &self.season
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates for a slot, best first. Ties break on prize id.
    #[must_use]
    pub fn ranked(&self, slot: Slot) -> Vec<&Candidate> {
        let mut ranked: Vec<&Candidate> = self
            .candidates
            .iter()
            .filter(|c| c.slot() == slot)
            .collect();
        ranked.sort_by(|a, b| {
            b.score()
                .total_cmp(&a.score())
                .then_with(|| a.prize.id.cmp(&b.prize.id))
        });
        ranked
    }

    /// Split a slot's ranked candidates into `count` tiers.
    ///
    /// Rank `i` of `n` lands in tier index `min(count - 1, i * count / n)`.
    pub fn tiers(&self, slot: Slot, count: usize) -> Result<Vec<Vec<&Candidate>>> {
        let ranked = self.ranked(slot);
        let n = ranked.len();
        if count == 0 || n < count {
            return Err(ServiceError::NotEnoughCandidates {
                slot,
                found: n,
                needed: count,
            });
        }

        let mut tiers: Vec<Vec<&Candidate>> = vec![Vec::new(); count];
        for (i, candidate) in ranked.into_iter().enumerate() {
            let index = (i * count / n).min(count - 1);
            tiers[index].push(candidate);
        }
        if let Some(empty) = tiers.iter().position(Vec::is_empty) {
            return Err(ServiceError::EmptyTier(empty + 1));
        }
        Ok(tiers)
    }

    /// Build the pool for `(seed, slot)`.
    pub fn build_pool(&self, seed: u64, slot: Slot, pool_size: usize) -> Result<CasePool> {
        let tiers = self.tiers(slot, pool_size)?;
        let mut rng = GameRng::new(seed).for_context("pool");

        let mut picks = Vec::with_capacity(pool_size);
        for (index, bucket) in tiers.iter().enumerate() {
            let pick = rng
                .choose(bucket)
                .ok_or(ServiceError::EmptyTier(index + 1))?;
            picks.push((index + 1, *pick));
        }
        rng.shuffle(&mut picks);

        let cases = picks
            .into_iter()
            .enumerate()
            .map(|(i, (tier, candidate))| {
                let score = (candidate.score() * 100.0).round() / 100.0;
                Case::new(
                    CaseNumber::new((i + 1) as u8),
                    Tier::new(tier as u8),
                    candidate.prize.clone(),
                    score,
                )
            })
            .collect();

        debug!(%slot, seed, "built case pool");
        Ok(CasePool::new(self.season.clone(), seed, slot, cases, pool_size)?)
    }

    /// Draw the banker's offer.
    pub fn pick_offer(&self, request: &OfferRequest, pool_size: usize) -> Result<BankerOffer> {
        let tiers = self.tiers(request.slot, pool_size)?;
        let mut rng = GameRng::new(request.seed).for_context("offer");

        for tier in search_order(request.target_tier, pool_size) {
            let Some(bucket) = tiers.get(tier.raw() as usize - 1) else {
                continue;
            };
            let eligible: Vec<&Candidate> = bucket
                .iter()
                .copied()
                .filter(|c| !request.exclude.contains(&c.prize.id))
                .collect();
            if let Some(pick) = rng.choose(&eligible) {
                return Ok(BankerOffer {
                    target_tier: request.target_tier,
                    picked_tier: tier,
                    prize: pick.prize.clone(),
                });
            }
        }

        Err(ServiceError::Unavailable(format!(
            "no {} left for the banker to offer",
            request.slot
        )))
    }

    /// Players whose name contains `query`, active first, then by name.
    ///
    /// `limit` is clamped to `1..=25`. A blank query matches nothing.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<Prize> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&Candidate> = self
            .candidates
            .iter()
            .filter(|c| c.prize.name.to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| {
            (!a.active, &a.prize.name).cmp(&(!b.active, &b.prize.name))
        });
        matches
            .into_iter()
            .take(limit.clamp(1, MAX_SEARCH_LIMIT))
            .map(|c| c.prize.clone())
            .collect()
    }
}

/// Tiers to try for a target: the target, then outward one step at a time,
/// lower tier first. Stays within `1..=pool_size`.
fn search_order(target: Tier, pool_size: usize) -> impl Iterator<Item = Tier> {
    let target = target.raw() as i64;
    let max = pool_size as i64;
    (0..max)
        .flat_map(move |d| {
            if d == 0 {
                vec![target]
            } else {
                vec![target - d, target + d]
            }
        })
        .filter(move |&t| (1..=max).contains(&t))
        .map(|t| Tier::new(t as u8))
}

/// `Catalog` behind the collaborator traits.
#[derive(Clone, Debug)]
pub struct LocalBackend {
    catalog: Arc<Catalog>,
    pool_size: usize,
}

impl LocalBackend {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    #[must_use]
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[async_trait::async_trait]
impl PoolGenerator for LocalBackend {
    async fn generate(&self, seed: u64, slot: Slot) -> Result<CasePool> {
        self.catalog.build_pool(seed, slot, self.pool_size)
    }
}

#[async_trait::async_trait]
impl OfferGenerator for LocalBackend {
    async fn offer(&self, request: &OfferRequest) -> Result<BankerOffer> {
        self.catalog.pick_offer(request, self.pool_size)
    }
}

#[async_trait::async_trait]
impl PlayerSearch for LocalBackend {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Prize>> {
        Ok(self.catalog.search(query, limit))
    }
}

const FIRST_NAMES: [&str; 12] = [
    "Aaron", "Bryce", "Caleb", "Darius", "Elijah", "Felix", "Grant", "Hassan", "Isaiah", "Jalen",
    "Keon", "Luca",
];
const LAST_NAMES: [&str; 10] = [
    "Adams", "Brooks", "Carter", "Dawson", "Ellis", "Foster", "Greene", "Hayes", "Irving", "Jordan",
];
const TEAMS: [&str; 10] = [
    "ATL", "BOS", "CHI", "DAL", "DEN", "GSW", "LAL", "MIA", "NYK", "PHX",
];
const POSITIONS: [&str; 5] = ["G", "G-F", "F", "F-C", "C"];

/// Deterministic synthetic catalog: 24 players per slot.
#[must_use]
pub fn demo_catalog() -> Catalog {
    let mut rng = GameRng::new(2024).for_context("catalog");
    let mut stat = |max_tenths: usize| rng.gen_range_usize(0..max_tenths + 1) as f64 / 10.0;

    let total = FIRST_NAMES.len() * LAST_NAMES.len();
    let candidates = (0..total)
        .map(|i| {
            let name = format!(
                "{} {}",
                FIRST_NAMES[i % FIRST_NAMES.len()],
                LAST_NAMES[i / FIRST_NAMES.len()]
            );
            let stats = StatLine {
                pts: stat(320),
                reb: stat(140),
                ast: stat(110),
                stl: stat(25),
                blk: stat(30),
                tov: stat(45),
            };
            Candidate {
                prize: Prize::new(PrizeId::new(1000 + i as u64), name, TEAMS[i % TEAMS.len()]),
                position: POSITIONS[i % POSITIONS.len()].to_string(),
                stats,
                active: i % 7 != 0,
            }
        })
        .collect();

    Catalog::new(DEMO_SEASON, candidates)
}
