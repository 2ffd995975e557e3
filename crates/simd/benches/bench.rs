// This software is licensed under a dual license model:
//
// GNU Affero General Public License v3 (AGPLv3): You may use, modify, and
// distribute this software under the terms of the AGPLv3.
//
// Elastic License v2 (ELv2): You may also use, modify, and distribute this
// software under the Elastic License v2, which has specific restrictions.
//
// We welcome any commercial collaboration or support. For inquiries
// regarding the licenses, please contact us at:
// vectorchord-inquiry@tensorchord.ai
//
// Copyright (c) 2025 TensorChord Inc.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use simd::lanes::Portable;
use std::hint::black_box;

const SIZES: [usize; 6] = [10, 100, 1000, 10000, 100000, 1000000];

fn random_ints(rng: &mut ChaCha12Rng, n: usize) -> Vec<i32> {
    (0..n).map(|_| rng.random_range(-10000..10000)).collect()
}

fn byte_is_equal(c: &mut Criterion) {
    use simd::byte::is_equal;
    let mut group = c.benchmark_group("byte::is_equal");
    for n in SIZES {
        // equal inputs, so that no tier returns early
        let x = vec![0_u8; n];
        let y = vec![0_u8; n];
        group.throughput(Throughput::Bytes(n as u64));
        group.bench_with_input(BenchmarkId::new("fallback", n), &n, |b, _| {
            b.iter(|| is_equal::fallback(black_box(&x), black_box(&y)))
        });
        group.bench_with_input(BenchmarkId::new("iterator", n), &n, |b, _| {
            b.iter(|| is_equal::iterator(black_box(&x), black_box(&y)))
        });
        group.bench_with_input(BenchmarkId::new("memcmp", n), &n, |b, _| {
            b.iter(|| is_equal::memcmp(black_box(&x), black_box(&y)))
        });
        group.bench_with_input(BenchmarkId::new("portable", n), &n, |b, _| {
            b.iter(|| is_equal::vectorized::<Portable>(black_box(&x), black_box(&y)))
        });
        group.bench_with_input(BenchmarkId::new("native", n), &n, |b, _| {
            b.iter(|| is_equal(black_box(&x), black_box(&y)))
        });
    }
    group.finish();
}

fn int_reduce_sum_of_x(c: &mut Criterion) {
    use simd::int::reduce_sum_of_x;
    let mut rng = ChaCha12Rng::seed_from_u64(31337);
    let mut group = c.benchmark_group("int::reduce_sum_of_x");
    for n in SIZES {
        let x = random_ints(&mut rng, n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("fallback", n), &n, |b, _| {
            b.iter(|| reduce_sum_of_x::fallback(black_box(&x)))
        });
        group.bench_with_input(BenchmarkId::new("iterator", n), &n, |b, _| {
            b.iter(|| reduce_sum_of_x::iterator(black_box(&x)))
        });
        group.bench_with_input(BenchmarkId::new("portable", n), &n, |b, _| {
            b.iter(|| reduce_sum_of_x::vectorized::<Portable>(black_box(&x)))
        });
        group.bench_with_input(BenchmarkId::new("native", n), &n, |b, _| {
            b.iter(|| reduce_sum_of_x(black_box(&x)))
        });
    }
    group.finish();
}

fn int_reduce_sum_of_x_wrapping(c: &mut Criterion) {
    use simd::int::reduce_sum_of_x_wrapping;
    let mut rng = ChaCha12Rng::seed_from_u64(31337);
    let mut group = c.benchmark_group("int::reduce_sum_of_x_wrapping");
    for n in SIZES {
        let x = random_ints(&mut rng, n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("fallback", n), &n, |b, _| {
            b.iter(|| reduce_sum_of_x_wrapping::fallback(black_box(&x)))
        });
        group.bench_with_input(BenchmarkId::new("native", n), &n, |b, _| {
            b.iter(|| reduce_sum_of_x_wrapping(black_box(&x)))
        });
    }
    group.finish();
}

fn int_reduce_count_of_eq(c: &mut Criterion) {
    use simd::int::reduce_count_of_eq;
    let mut rng = ChaCha12Rng::seed_from_u64(31337);
    let mut group = c.benchmark_group("int::reduce_count_of_eq");
    for n in SIZES {
        let x = random_ints(&mut rng, n);
        let item = rng.random_range(-10000..10000);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("fallback", n), &n, |b, _| {
            b.iter(|| reduce_count_of_eq::fallback(black_box(&x), black_box(item)))
        });
        group.bench_with_input(BenchmarkId::new("iterator", n), &n, |b, _| {
            b.iter(|| reduce_count_of_eq::iterator(black_box(&x), black_box(item)))
        });
        group.bench_with_input(BenchmarkId::new("portable", n), &n, |b, _| {
            b.iter(|| reduce_count_of_eq::vectorized::<Portable>(black_box(&x), black_box(item)))
        });
        group.bench_with_input(BenchmarkId::new("native", n), &n, |b, _| {
            b.iter(|| reduce_count_of_eq(black_box(&x), black_box(item)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    byte_is_equal,
    int_reduce_sum_of_x,
    int_reduce_sum_of_x_wrapping,
    int_reduce_count_of_eq,
);
criterion_main!(benches);
