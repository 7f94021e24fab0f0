// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_benches::synthetic_dataset;
use canopy_scene::{GroupColors, Palette, SceneBuilder};
use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene/build");

    for len in [1_000usize, 10_000, 100_000] {
        let dataset = synthetic_dataset(len);
        let builder = SceneBuilder::default();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("build", len), &dataset, |b, dataset| {
            b.iter(|| black_box(builder.build(dataset)));
        });

        group.bench_with_input(BenchmarkId::new("tiled_x4", len), &dataset, |b, dataset| {
            b.iter_batched(
                || dataset.clone(),
                |dataset| black_box(builder.build(&dataset.tiled(2, 100.0))),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_group_colors(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene/group_colors");

    // Group assignment must stay linear even with many distinct groups.
    for distinct in [10usize, 1_000, 50_000] {
        let labels: Vec<String> = (0..100_000).map(|i| format!("g{}", i % distinct)).collect();
        group.throughput(Throughput::Elements(labels.len() as u64));
        group.bench_with_input(BenchmarkId::new("assign", distinct), &labels, |b, labels| {
            b.iter(|| {
                black_box(GroupColors::new(
                    labels.iter().map(String::as_str),
                    Palette::default(),
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_group_colors);
criterion_main!(benches);
