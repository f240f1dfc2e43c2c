use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizforge_core::scoring::{is_correct, percentage};

fn set(range: std::ops::Range<usize>) -> BTreeSet<usize> {
    range.collect()
}

fn bench_is_correct(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_correct");

    let small_correct = set(0..2);
    let small_match = set(0..2);
    let small_miss = set(1..3);
    group.bench_function("small_match", |b| {
        b.iter(|| is_correct(black_box(&small_match), black_box(&small_correct)))
    });
    group.bench_function("small_miss", |b| {
        b.iter(|| is_correct(black_box(&small_miss), black_box(&small_correct)))
    });

    let wide_correct = set(0..64);
    let wide_match = set(0..64);
    group.bench_function("wide_match", |b| {
        b.iter(|| is_correct(black_box(&wide_match), black_box(&wide_correct)))
    });

    group.finish();
}

fn bench_percentage(c: &mut Criterion) {
    let mut group = c.benchmark_group("percentage");

    group.bench_function("normal", |b| {
        b.iter(|| percentage(black_box(7), black_box(10)))
    });
    group.bench_function("zero_total", |b| {
        b.iter(|| percentage(black_box(0), black_box(0)))
    });

    group.finish();
}

criterion_group!(benches, bench_is_correct, bench_percentage);
criterion_main!(benches);
