use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use merge::MergeSession;
use record::{BustupKey, BustupRecord};

const N_BASELINE: usize = 10_000;
const N_OVERRIDE: usize = 1_000;

fn rec(i: usize, flags: u32) -> BustupRecord {
    BustupRecord::new(BustupKey::new((i / 100) as u16, (i % 100) as u16, 0), flags)
}

fn baseline() -> Vec<BustupRecord> {
    (0..N_BASELINE).map(|i| rec(i, 1)).collect()
}

fn fold_changed_benchmark(c: &mut Criterion) {
    // Every other record changes, the rest are stock copies.
    let incoming: Vec<BustupRecord> = (0..N_OVERRIDE)
        .map(|i| rec(i * 7, if i % 2 == 0 { 2 } else { 1 }))
        .collect();

    c.bench_function("fold_1k_into_10k", |b| {
        b.iter_batched(
            || {
                let mut session = MergeSession::new();
                session.set_original(&baseline());
                session
            },
            |mut session| {
                session.fold_override(&incoming).unwrap();
            },
            BatchSize::LargeInput,
        );
    });
}

fn fold_full_stock_copy_benchmark(c: &mut Criterion) {
    let stock = baseline();

    c.bench_function("fold_stock_copy_10k", |b| {
        b.iter_batched(
            || {
                let mut session = MergeSession::new();
                session.set_original(&stock);
                session
            },
            |mut session| {
                let summary = session.fold_override(&stock).unwrap();
                assert_eq!(summary.skipped.len(), N_BASELINE);
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, fold_changed_benchmark, fold_full_stock_copy_benchmark);
criterion_main!(benches);
