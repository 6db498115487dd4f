use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deal_draft::core::{Slot, Tier};
use deal_draft::driver::{RandomPlayer, Table, Threshold};
use deal_draft::game::{target_tier, GameMachine, Session};
use deal_draft::services::{demo_catalog, LocalBackend};

fn build_pool(c: &mut Criterion) {
    let catalog = demo_catalog();
    let mut group = c.benchmark_group("build_pool");
    for slot in Slot::all() {
        group.bench_function(BenchmarkId::from_parameter(slot), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                black_box(catalog.build_pool(seed, slot, 16))
            })
        });
    }
    group.finish();
}

fn target(c: &mut Criterion) {
    let tiers: Vec<Tier> = (1..=16).map(Tier::new).collect();
    c.bench_function("target_tier", |b| {
        b.iter(|| black_box(target_tier(tiers.iter().copied(), Tier::new(1), Tier::new(16))))
    });
}

fn roster_draft(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let backend = LocalBackend::new(demo_catalog());
    let mut group = c.benchmark_group("roster_draft");

    group.bench_function("threshold", |b| {
        b.to_async(&runtime).iter(|| {
            let backend = backend.clone();
            async move {
                let machine = GameMachine::new(Session::default()).expect("valid config");
                let mut table = Table::new(machine, backend);
                let mut strategy = Threshold::default().with_deal_at(Tier::new(6));
                black_box(table.draft_roster(&mut strategy).await)
            }
        })
    });

    group.bench_function("random", |b| {
        let mut seed = 0u64;
        b.to_async(&runtime).iter(|| {
            seed += 1;
            let backend = backend.clone();
            async move {
                let machine = GameMachine::new(Session::new(Default::default(), seed))
                    .expect("valid config");
                let mut table = Table::new(machine, backend);
                black_box(table.draft_roster(&mut RandomPlayer::new(seed)).await)
            }
        })
    });

    group.finish();
}

criterion_group!(benches, build_pool, target, roster_draft);
criterion_main!(benches);
