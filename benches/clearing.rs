//! Benchmarks for the GridClear auction engine.
//!
//! Measures snapshot freezing, clearing, and full round execution at
//! several book sizes.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run a specific benchmark
//! cargo bench -- run_round
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

use gridclear::{CallAuction, ClearingEngine, Order, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// HELPER FUNCTIONS - Deterministic order generation
// ============================================================================

/// Base price: 9.00000000 per kWh (fixed-point, 10^8 scale)
const BASE_PRICE: u64 = 900_000_000;

/// Generate a deterministic mixed order flow around the base price.
fn generate_orders(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);

    for i in 0..count {
        let is_bid = rng.gen_bool(0.5);
        let price_offset: i64 = rng.gen_range(-200_000_000i64..=200_000_000i64);
        let price = (BASE_PRICE as i64 + price_offset) as u64;
        let quantity: u64 = rng.gen_range(1_000_000..=200_000_000);

        orders.push(Order::new(
            (i + 1) as u64,
            format!("wallet-{}", rng.gen_range(1..=100u32)),
            if is_bid { Side::Bid } else { Side::Ask },
            price,
            quantity,
            (i + 1) as u64,
        ));
    }

    orders
}

/// Build an auction holding `count` pending orders.
fn populated_auction(count: usize, seed: u64) -> CallAuction {
    let mut auction = CallAuction::with_capacity(count);
    for order in generate_orders(count, seed) {
        auction.submit(order).expect("generated orders are valid");
    }
    auction
}

// ============================================================================
// BENCHMARKS
// ============================================================================

/// Benchmark snapshot freezing (partition + canonical sort).
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for &size in &[100usize, 1_000, 10_000] {
        let auction = populated_auction(size, 0xBEEF);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(auction.book().snapshot()));
        });
    }

    group.finish();
}

/// Benchmark the clearing computation alone on a frozen snapshot.
fn bench_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear");

    for &size in &[100usize, 1_000, 10_000] {
        let auction = populated_auction(size, 0xBEEF);
        let snapshot = auction.book().snapshot();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(ClearingEngine::clear(&snapshot)));
        });
    }

    group.finish();
}

/// Benchmark a full round: freeze, clear, match, commit, record.
fn bench_run_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_round");

    for &size in &[100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || populated_auction(size, 0xBEEF),
                |mut auction| {
                    auction.run_round(1).expect("round settles");
                    black_box(auction.history().last_root())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_snapshot, bench_clear, bench_run_round);
criterion_main!(benches);
