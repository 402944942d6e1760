use criterion::{black_box, criterion_group, criterion_main, Criterion};
extern crate magcharge as lib;

extern crate nalgebra;
use lib::magnetic::{self, MagneticFieldSampler, Position, SampleMagnetFieldSystem};
use lib::shapes::{Cylinder, Shape};
use nalgebra::Vector3;
use rand_distr::{Distribution, Normal};
use specs::prelude::*;

fn criterion_benchmark(c: &mut Criterion) {
    let magnet = Cylinder {
        center: Vector3::new(0.0, 0.0, 0.0),
        radius: 0.01,
        height: 0.02,
        b: 1.0,
        density: 9,
    }
    .magnet("b")
    .unwrap();

    // Sample points scattered around the magnet.
    let dist = Normal::new(0.0, 0.02).unwrap();
    let mut rng = rand::thread_rng();
    let points: Vec<Vector3<f64>> = (0..10_000)
        .map(|_| {
            Vector3::new(
                dist.sample(&mut rng),
                dist.sample(&mut rng),
                dist.sample(&mut rng) + 0.05,
            )
        })
        .collect();

    c.bench_function("magnet_field_at", |b| {
        b.iter(|| magnet.field_at(black_box(&points[0])).unwrap())
    });

    c.bench_function("magnet_field_on_points", |b| {
        b.iter(|| magnet.field_on_points(black_box(&points)).unwrap())
    });

    let axis = Vector3::new(0.3, -1.2, 0.8);
    let point = Vector3::new(0.01, 0.0, -0.02);
    c.bench_function("magnet_rotate", |b| {
        b.iter(|| {
            let mut rotated = magnet.clone();
            rotated.rotate(&point, black_box(&axis), 0.7).unwrap();
            rotated
        })
    });

    // Mock up a world with the magnet and a sampler at every point.
    let mut world = World::new();
    magnetic::register_components(&mut world);
    let mut builder = DispatcherBuilder::new();
    magnetic::add_systems_to_dispatch(&mut builder, &[]);
    let mut dispatcher = builder.build();
    dispatcher.setup(&mut world);
    world.create_entity().with(magnet.clone()).build();
    for pos in points.iter() {
        world
            .create_entity()
            .with(Position { pos: *pos })
            .with(MagneticFieldSampler::default())
            .build();
    }
    dispatcher.dispatch(&world);
    world.maintain();

    // Now bench just the sampling system.
    let mut bench_builder = DispatcherBuilder::new();
    bench_builder.add(SampleMagnetFieldSystem, "", &[]);
    let mut bench_dispatcher = bench_builder.build();

    c.bench_function("sample_magnet_field_system", |b| {
        b.iter(|| bench_dispatcher.dispatch(&world))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
