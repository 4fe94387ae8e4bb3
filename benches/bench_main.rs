use std::hint::black_box;

use bevy::prelude::*;
use bevy_veldt::{BillboardMode, BillboardSystem, HeightField, TerrainMeshBuilder};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_mesh_generation(c: &mut Criterion) {
    let samples: Vec<f32> = (0..128 * 128)
        .map(|i| ((i % 128 + i / 128) as f32 * 0.1).sin().abs())
        .collect();
    let field = HeightField::from_normalized(&samples, 128, 128, 1.0, 60.0);

    c.bench_function("TerrainMeshBuilder 128x128", |b| {
        b.iter(|| {
            TerrainMeshBuilder::new()
                .with_world_scale(50.0)
                .build(black_box(&field))
        });
    });
}

fn bench_billboard_tick(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let centers: Vec<Vec3> = (0..512)
        .map(|i| Vec3::new(i as f32 * 10.0, 50_000.0, i as f32 * -10.0))
        .collect();
    let mut system = BillboardSystem::new(
        Vec2::new(200.0, 200.0),
        &centers,
        Handle::default(),
        BillboardMode::Spherical,
    );

    c.bench_function("BillboardSystem tick 512 quads", |b| {
        b.iter(|| system.tick(black_box(1.0 / 60.0), &mut rng));
    });
}

criterion_group!(benches, bench_mesh_generation, bench_billboard_tick);
criterion_main!(benches);
