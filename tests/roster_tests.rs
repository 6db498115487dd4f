//! Roster drafting through the async `Table` driver.

mod common;

use std::sync::atomic::Ordering;

use common::FlakyBackend;
use deal_draft::core::{Slot, Tier};
use deal_draft::driver::{RandomPlayer, Table, Threshold};
use deal_draft::game::{Command, GameError, GameMachine, Resolution, Session};
use deal_draft::services::{demo_catalog, LocalBackend, ServiceError};

fn local_table(seed: u64) -> Table<LocalBackend> {
    let machine = GameMachine::new(Session::new(Default::default(), seed)).unwrap();
    Table::new(machine, LocalBackend::new(demo_catalog()))
}

fn flaky_table(pool_failures: usize, offer_failures: usize) -> Table<FlakyBackend> {
    let machine = GameMachine::new(Session::default()).unwrap();
    Table::new(machine, FlakyBackend::new(pool_failures, offer_failures))
}

// =============================================================================
// Local Catalog
// =============================================================================

#[tokio::test]
async fn test_draft_full_roster_without_deals() {
    let mut table = local_table(7);
    let roster = table.draft_roster(&mut Threshold::default()).await.unwrap();

    assert!(roster.is_complete());
    let catalog = table.backend().catalog();
    for (slot, prize) in roster.iter() {
        let prize = prize.unwrap();
        let ranked = catalog.ranked(slot);
        assert!(
            ranked.iter().any(|c| c.prize.id == prize.id),
            "{prize} is not a {slot}"
        );
    }
}

#[tokio::test]
async fn test_draft_takes_first_offer() {
    let mut table = local_table(3);
    let mut strategy = Threshold::default().with_deal_at(Tier::new(16));
    let resolution = table.play_slot(Slot::SF, &mut strategy).await.unwrap();

    let Resolution::Deal { round, offer } = resolution else {
        panic!("expected a deal");
    };
    assert_eq!(round, 0);
    // The banker never offers a prize from the visible pool.
    let pool = table.machine().pool().unwrap();
    assert!(!pool.prize_ids().contains(&offer.prize.id));
    assert_eq!(
        table.machine().session().roster.get(Slot::SF),
        Some(&offer.prize)
    );
}

#[tokio::test]
async fn test_draft_is_deterministic() {
    let mut a = local_table(11);
    let mut b = local_table(11);
    let strategy = Threshold::default().with_switch(true);

    let roster_a = a.draft_roster(&mut strategy.clone()).await.unwrap();
    let roster_b = b.draft_roster(&mut strategy.clone()).await.unwrap();
    assert_eq!(roster_a, roster_b);
}

#[tokio::test]
async fn test_random_player_completes_roster() {
    for seed in 0..5 {
        let mut table = local_table(seed);
        let roster = table
            .draft_roster(&mut RandomPlayer::new(seed).with_deal_percent(30))
            .await
            .unwrap();
        assert!(roster.is_complete());
    }
}

#[tokio::test]
async fn test_filled_slot_is_unavailable() {
    let mut table = local_table(1);
    table.play_slot(Slot::PG, &mut Threshold::default()).await.unwrap();

    let err = table
        .play_slot(Slot::PG, &mut Threshold::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::SlotUnavailable(Slot::PG)));
}

#[tokio::test]
async fn test_draft_resumes_after_reset_playthrough() {
    let mut table = local_table(4);
    table.play_slot(Slot::C, &mut Threshold::default()).await.unwrap();
    assert!(table.apply(Command::ResetPlaythrough));

    let roster = table.draft_roster(&mut Threshold::default()).await.unwrap();
    assert!(roster.is_complete());
}

// =============================================================================
// Collaborator Failures
// =============================================================================

#[tokio::test]
async fn test_pool_load_retries() {
    let mut table = flaky_table(2, 0);
    let roster = table.draft_roster(&mut Threshold::default()).await.unwrap();

    assert!(roster.is_complete());
    // Two failures, then one success per slot.
    assert_eq!(table.backend().pool_calls.load(Ordering::SeqCst), 7);
}

#[tokio::test]
async fn test_pool_load_gives_up() {
    let mut table = flaky_table(10, 0).with_attempts(2);
    let err = table
        .play_slot(Slot::PG, &mut Threshold::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GameError::LoadFailure(ServiceError::Unavailable(_))
    ));
    assert!(err.is_retryable());
    assert_eq!(table.backend().pool_calls.load(Ordering::SeqCst), 2);
    assert!(!table.machine().session().roster.is_filled(Slot::PG));
}

#[tokio::test]
async fn test_offer_retries() {
    let mut table = flaky_table(0, 2);
    let mut strategy = Threshold::default().with_deal_at(Tier::new(16));
    let resolution = table.play_slot(Slot::SG, &mut strategy).await.unwrap();

    assert!(matches!(resolution, Resolution::Deal { round: 0, .. }));
    assert_eq!(table.backend().offer_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_offer_gives_up() {
    let mut table = flaky_table(0, 10);
    let err = table
        .play_slot(Slot::SG, &mut Threshold::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GameError::OfferFailure(_)));
    assert_eq!(table.backend().offer_calls.load(Ordering::SeqCst), 3);
}
