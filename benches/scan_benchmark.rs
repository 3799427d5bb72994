//! Benchmarks for the two-pass scan kernel (`inclusive_scan`/
//! `exclusive_scan`) across chunk sizes and input sizes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parallex::{exclusive_scan, inclusive_scan, par};

fn bench_inclusive_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("inclusive_scan");

    for size in &[1_000usize, 100_000, 1_000_000] {
        let n = *size;
        let data: Vec<i64> = (0..n as i64).collect();

        group.bench_function(format!("auto_chunking_{n}"), |b| {
            b.iter(|| black_box(inclusive_scan(&par(), &data, |a, b| a + b).into_value().unwrap()))
        });

        group.bench_function(format!("static_chunk_4096_{n}"), |b| {
            let policy = par().with_static_chunk_size(4_096);
            b.iter(|| black_box(inclusive_scan(&policy, &data, |a, b| a + b).into_value().unwrap()))
        });
    }

    group.finish();
}

fn bench_exclusive_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("exclusive_scan");
    let data: Vec<i64> = (0..1_000_000).collect();

    group.bench_function("auto_chunking_1m", |b| {
        b.iter(|| black_box(exclusive_scan(&par(), &data, 0i64, |a, b| a + b).into_value().unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_inclusive_scan, bench_exclusive_scan);
criterion_main!(benches);
