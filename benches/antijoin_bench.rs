// In benches/antijoin_bench.rs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use antijoin::{antijoin, antijoin_set, antijoin_with, NullValuePolicy};

// --- Mock Data Generation ---

/// Builds `total` distinct keys split across two sides, with the middle
/// `overlap` keys present on both.
fn generate_overlapping(total: u64, overlap: u64) -> (Vec<u64>, Vec<u64>) {
    let offset = (total - overlap) / 2;
    let left: Vec<u64> = (0..offset + overlap).collect();
    let right: Vec<u64> = (offset..total).collect();
    (left, right)
}

/// Keys where every tenth value is treated as absent.
fn sparse_key(value: &u64) -> Option<u64> {
    (value % 10 != 0).then_some(*value)
}

// --- Benchmark Suite ---

const BENCH_SIZES: [u64; 3] = [1_000, 100_000, 1_000_000];

fn bench_antijoin_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("Antijoin Variants");

    for &total in BENCH_SIZES.iter() {
        let (left, right) = generate_overlapping(total, total / 4);
        group.throughput(Throughput::Elements(total));

        group.bench_with_input(BenchmarkId::new("List (Identity Key)", total), &total, |b, _| {
            b.iter(|| black_box(antijoin(black_box(left.clone()), black_box(right.clone()))))
        });

        group.bench_with_input(
            BenchmarkId::new("List (Sparse Key, RetainFull)", total),
            &total,
            |b, _| {
                b.iter(|| {
                    black_box(antijoin_with(
                        black_box(left.clone()),
                        black_box(right.clone()),
                        sparse_key,
                        sparse_key,
                        NullValuePolicy::RetainFull,
                    ))
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("Set (Identity Key)", total), &total, |b, _| {
            b.iter(|| {
                black_box(antijoin_set(
                    black_box(left.clone()),
                    black_box(right.clone()),
                    |v: &u64| Some(*v),
                    |v: &u64| Some(*v),
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_antijoin_variants);
criterion_main!(benches);
