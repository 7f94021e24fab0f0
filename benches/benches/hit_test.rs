// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_benches::synthetic_dataset;
use canopy_camera::{CameraPosition, Projection};
use canopy_hit::{PointPicker, Ray, pointer_to_ndc};
use canopy_scene::SceneBuilder;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::DVec3;
use kurbo::{Point, Size};

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit/nearest");
    let projection = Projection::new(Size::new(1280.0, 720.0));

    // Hover runs a linear scan on every pointer move; this is the cost of one move.
    for len in [1_000usize, 10_000, 100_000] {
        let geometry = SceneBuilder::default().build(&synthetic_dataset(len));
        group.throughput(Throughput::Elements(len as u64));

        for (label, z) in [("far", projection.far()), ("near", 20.0)] {
            let camera = CameraPosition::new(0.0, 0.0, z);
            let picker = PointPicker::from_pixels(6.0, &projection, camera);
            let ndc = pointer_to_ndc(Point::new(700.0, 300.0), projection.viewport());
            let ray = Ray::from_camera(camera, ndc, &projection);

            group.bench_with_input(
                BenchmarkId::new(label, len),
                &geometry.positions,
                |b, positions| {
                    b.iter(|| black_box(picker.nearest(&ray, positions, DVec3::ONE)));
                },
            );
        }

        let camera = CameraPosition::new(0.0, 0.0, projection.far());
        let picker = PointPicker::from_pixels(6.0, &projection, camera);
        let ndc = pointer_to_ndc(Point::new(640.0, 360.0), projection.viewport());
        let ray = Ray::from_camera(camera, ndc, &projection);
        group.bench_with_input(
            BenchmarkId::new("scaled_axes", len),
            &geometry.positions,
            |b, positions| {
                let scale = DVec3::new(4.0, 0.5, 1.0);
                b.iter(|| black_box(picker.nearest(&ray, positions, scale)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_nearest);
criterion_main!(benches);
