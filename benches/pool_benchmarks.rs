//! Benchmarks comparing head-end vs. tail-end allocation throughput and the
//! fast-path vs. slow-path cost of reallocate.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nebula_pool::{Pool, PoolConfig};
use std::hint::black_box;

fn bench_allocate_ends(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");

    group.bench_function("head_64b", |b| {
        let pool = Pool::new(16 * 1024 * 1024, PoolConfig::default()).unwrap();
        b.iter(|| {
            let p = pool.allocate(64, false).unwrap();
            black_box(p);
        });
    });

    group.bench_function("tail_64b", |b| {
        let pool = Pool::new(16 * 1024 * 1024, PoolConfig::default()).unwrap();
        b.iter(|| {
            let p = pool.allocate(64, true).unwrap();
            black_box(p);
        });
    });

    group.finish();
}

fn bench_reallocate_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("reallocate");
    group.throughput(Throughput::Elements(1));

    group.bench_function(BenchmarkId::new("fast_path", "grow_64_to_128"), |b| {
        let pool = Pool::new(16 * 1024 * 1024, PoolConfig::default()).unwrap();
        b.iter_batched(
            || pool.allocate(64, false).unwrap(),
            |p| unsafe {
                let grown = pool.reallocate(p, 64, 128).unwrap();
                black_box(grown);
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("slow_path", "grow_64_to_128"), |b| {
        let pool = Pool::new(16 * 1024 * 1024, PoolConfig::default()).unwrap();
        b.iter_batched(
            || {
                let p = pool.allocate(64, false).unwrap();
                // Allocate one more block so `p` is no longer the last one,
                // forcing reallocate onto the slow (relocate) path.
                let _pin = pool.allocate(16, false).unwrap();
                p
            },
            |p| unsafe {
                let moved = pool.reallocate(p, 64, 128).unwrap();
                black_box(moved);
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("reset");

    group.bench_function("with_preservation", |b| {
        let pool = Pool::new(1024 * 1024, PoolConfig::default()).unwrap();
        b.iter_batched(
            || pool.allocate(256, false).unwrap(),
            |p| unsafe {
                let kept = pool.reset(Some(p), 64, 256).unwrap();
                black_box(kept);
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("full_discard", |b| {
        let pool = Pool::new(1024 * 1024, PoolConfig::default()).unwrap();
        b.iter(|| unsafe {
            let result = pool.reset(None, 0, 0).unwrap();
            black_box(result);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_allocate_ends, bench_reallocate_paths, bench_reset);
criterion_main!(benches);
