//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use deal_draft::core::{Case, CaseNumber, Prize, PrizeId, Slot, Tier, DEFAULT_POOL_SIZE};
use deal_draft::game::{BankerOffer, Command, GameMachine, OfferRequest, Session};
use deal_draft::pool::CasePool;
use deal_draft::services::{OfferGenerator, PoolGenerator, Result, ServiceError};

/// Pool where case N holds tier N. Prize ids are unique per slot.
pub fn ranked_pool(slot: Slot, seed: u64) -> CasePool {
    let cases = (1..=DEFAULT_POOL_SIZE as u8)
        .map(|n| {
            let id = slot.index() as u64 * 100 + n as u64;
            let prize = Prize::new(PrizeId::new(id), format!("{slot} #{n}"), "TM");
            Case::new(CaseNumber::new(n), Tier::new(n), prize, 40.0 - n as f64)
        })
        .collect();
    CasePool::new("test", seed, slot, cases, DEFAULT_POOL_SIZE).unwrap()
}

/// Offer with an id no test pool uses.
pub fn banker_offer(id: u64, tier: u8) -> BankerOffer {
    BankerOffer {
        target_tier: Tier::new(tier),
        picked_tier: Tier::new(tier),
        prize: Prize::new(PrizeId::new(10_000 + id), format!("Banker {id}"), "BNK"),
    }
}

/// Machine with `slot` selected and a ranked pool adopted.
pub fn started_machine(slot: Slot) -> GameMachine {
    let mut machine = GameMachine::new(Session::default()).unwrap();
    assert!(machine.apply(Command::SelectSlot(slot)));
    assert!(machine.start(ranked_pool(slot, 7)));
    machine
}

/// Open each case in order through `apply`.
pub fn open_all(machine: &mut GameMachine, cases: &[u8]) {
    for &n in cases {
        assert!(
            machine.apply(Command::Open(CaseNumber::new(n))),
            "opening case {n} in {:?}",
            machine.phase()
        );
    }
}

/// Cases opened in each round when case 8 is reserved, in schedule order.
pub const ROUNDS_AROUND_8: [&[u8]; 5] = [
    &[1, 2, 3, 4],
    &[5, 6, 7],
    &[9, 10, 11],
    &[12, 13],
    &[14, 15],
];

/// Backend serving ranked pools, failing the first N calls of each kind.
#[derive(Debug, Default)]
pub struct FlakyBackend {
    pool_failures: AtomicUsize,
    offer_failures: AtomicUsize,
    pub pool_calls: AtomicUsize,
    pub offer_calls: AtomicUsize,
}

impl FlakyBackend {
    pub fn new(pool_failures: usize, offer_failures: usize) -> Self {
        Self {
            pool_failures: AtomicUsize::new(pool_failures),
            offer_failures: AtomicUsize::new(offer_failures),
            ..Self::default()
        }
    }

    fn should_fail(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait::async_trait]
impl PoolGenerator for FlakyBackend {
    async fn generate(&self, seed: u64, slot: Slot) -> Result<CasePool> {
        self.pool_calls.fetch_add(1, Ordering::SeqCst);
        if Self::should_fail(&self.pool_failures) {
            return Err(ServiceError::Unavailable("pool generator down".into()));
        }
        Ok(ranked_pool(slot, seed))
    }
}

#[async_trait::async_trait]
impl OfferGenerator for FlakyBackend {
    async fn offer(&self, request: &OfferRequest) -> Result<BankerOffer> {
        self.offer_calls.fetch_add(1, Ordering::SeqCst);
        if Self::should_fail(&self.offer_failures) {
            return Err(ServiceError::Unavailable("banker down".into()));
        }
        Ok(banker_offer(request.seed, request.target_tier.raw()))
    }
}
