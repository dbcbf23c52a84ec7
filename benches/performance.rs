// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use planar_dcel::{Dcel, HalfEdgeId, StressConfig, StressRunner};

/// Closed n-gon; returns the DCEL and one half-edge of the boundary
fn polygon(n: usize) -> (Dcel, HalfEdgeId) {
    let mut dcel = Dcel::with_capacity(n, n, 2);
    let first = dcel.make_edge();
    let mut last = first;
    for _ in 0..n - 2 {
        last = dcel.add_edge_vertex(last);
    }
    dcel.connect(last, first);
    (dcel, first)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    group.bench_function("make_edge_1000", |b| {
        b.iter(|| {
            let mut dcel = Dcel::new();
            for _ in 0..1000 {
                black_box(dcel.make_edge());
            }
            dcel
        });
    });

    for n in [64usize, 512, 4096] {
        group.bench_with_input(BenchmarkId::new("polygon", n), &n, |b, &n| {
            b.iter(|| polygon(black_box(n)));
        });
    }

    group.bench_function("fan_256", |b| {
        b.iter(|| {
            let (mut dcel, first) = polygon(256);
            // Cut triangles off the remaining face until it is a triangle
            let mut anchor = first;
            let mut e = dcel.lnext(first);
            while dcel.lnext(dcel.lnext(e)) != anchor {
                let chord = dcel.connect(e, anchor);
                anchor = dcel.sym(chord);
                e = dcel.lnext(anchor);
            }
            dcel
        });
    });

    group.finish();
}

fn bench_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit");

    group.bench_function("split_edge_1000", |b| {
        b.iter_batched(
            || polygon(16),
            |(mut dcel, first)| {
                for _ in 0..1000 {
                    black_box(dcel.split_edge(first));
                }
                dcel
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("connect_delete_cycle", |b| {
        let (mut dcel, first) = polygon(64);
        let opposite = dcel.face_ring(dcel.left(first)).nth(32).unwrap_or(first);
        b.iter(|| {
            let chord = dcel.connect(black_box(first), black_box(opposite));
            dcel.delete_edge(chord);
        });
    });

    group.bench_function("splice_involution", |b| {
        let (mut dcel, first) = polygon(64);
        let other = dcel.lnext(dcel.lnext(first));
        b.iter(|| {
            dcel.splice(black_box(first), black_box(other));
            dcel.splice(first, other);
        });
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let (dcel, first) = polygon(4096);

    group.bench_function("face_ring_4096", |b| {
        b.iter(|| dcel.face_len(black_box(dcel.left(first))));
    });

    group.bench_function("components_4096", |b| {
        b.iter(|| dcel.num_components());
    });

    group.bench_function("validate_4096", |b| {
        b.iter(|| dcel.validate().is_valid());
    });

    group.finish();
}

fn bench_stress(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress");
    group.sample_size(10);

    let runner = StressRunner::new(StressConfig {
        operations_per_run: 500,
        max_edges: 128,
        ..StressConfig::default()
    })
    .unwrap();
    group.bench_function("run_500", |b| {
        b.iter(|| runner.run_seed(black_box(7)));
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_edit, bench_queries, bench_stress);
criterion_main!(benches);
