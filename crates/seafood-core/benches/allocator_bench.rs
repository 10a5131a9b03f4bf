//! Criterion benchmarks for identifier allocation and derived attributes.
//!
//! Measures the per-record cost of the paths every entity constructor goes
//! through: fresh allocation, registration of a stored identifier, and the
//! synchronize hook run once per storage batch.
//!
//! Run with:
//! ```bash
//! cargo bench --package seafood-core --bench allocator_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seafood_core::{DerivedAttribute, IdAllocator, Numeric, Prefixed};

// ── Benchmarks: fresh allocation ──────────────────────────────────────────────

/// Benchmarks `allocate(None)` for both identifier formats.
fn bench_allocate_fresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate_fresh");

    let numeric = IdAllocator::new("OrderRow", Numeric);
    group.bench_function("numeric", |b| b.iter(|| black_box(numeric.allocate(None))));

    let prefixed = IdAllocator::new("Customer", Prefixed::new('C'));
    group.bench_function("prefixed", |b| b.iter(|| black_box(prefixed.allocate(None))));

    group.finish();
}

// ── Benchmarks: registration ──────────────────────────────────────────────────

/// Benchmarks `allocate(Some(id))` with identifiers below and above the counter.
fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate_supplied");
    let allocator = IdAllocator::new("Customer", Prefixed::new('C'));
    allocator
        .synchronize(None, Some(&"C500".to_string()))
        .expect("valid identifier");

    for id in ["C07", "C499", "C100000"] {
        let supplied = id.to_string();
        group.bench_with_input(BenchmarkId::new("prefixed", id), &supplied, |b, s| {
            b.iter(|| allocator.allocate(black_box(Some(s.clone()))))
        });
    }

    group.finish();
}

/// Benchmarks the batch synchronize hook.
fn bench_synchronize(c: &mut Criterion) {
    let allocator = IdAllocator::new("SeafoodBill", Prefixed::new('B'));
    let min = "B01".to_string();
    let max = "B12".to_string();

    c.bench_function("synchronize/prefixed", |b| {
        b.iter(|| allocator.synchronize(black_box(Some(&min)), black_box(Some(&max))))
    });
}

// ── Benchmarks: derived attribute ─────────────────────────────────────────────

/// Benchmarks one recompute followed by a cached read.
fn bench_recompute(c: &mut Criterion) {
    let mut price = DerivedAttribute::new("price");

    c.bench_function("derived/recompute_and_get", |b| {
        b.iter(|| {
            price.recompute(black_box(Some(3.0)), black_box(Some(4.5)));
            price.get(true)
        })
    });
}

criterion_group!(benches, bench_allocate_fresh, bench_register, bench_synchronize, bench_recompute);
criterion_main!(benches);
