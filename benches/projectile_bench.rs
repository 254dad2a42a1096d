use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use projectile_tracer::*;
use std::hint::black_box;

const DT: f32 = 1.0 / 60.0;

fn prepare_scene(walls: usize) -> Scene {
    let mut scene = Scene::new();
    scene.insert(SceneObject::cuboid(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(500.0, 1.0, 500.0),
    ));
    for i in 0..walls {
        scene.insert(SceneObject::cuboid(
            Vec3::new(i as f32 * 4.0 - 100.0, 5.0, 60.0),
            Vec3::new(1.5, 5.0, 0.5),
        ));
    }
    scene
}

fn prepare_world(count: usize, penetration: bool) -> ProjectileWorld {
    let mut world = ProjectileWorld::new();
    for i in 0..count {
        let spread = (i % 64) as f32 * 0.02 - 0.64;
        let config = ProjectileConfig::builder(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(spread * 50.0, 10.0, 300.0),
            Vec3::new(0.0, -9.8, 0.0),
        )
        .bounce(true)
        .penetration(penetration)
        .resistance(0.05)
        .build();
        world.spawn(config).expect("valid config");
    }
    world
}

fn bench_frame(c: &mut Criterion) {
    let scene = prepare_scene(50);
    let mut group = c.benchmark_group("frame_step");
    for &count in &[128usize, 512, 2048] {
        group.bench_with_input(BenchmarkId::new("bounce", count), &count, |b, &count| {
            b.iter(|| {
                let mut world = prepare_world(count, false);
                for _ in 0..10 {
                    world.step(black_box(DT), &scene);
                }
                black_box(world.len())
            })
        });
        group.bench_with_input(BenchmarkId::new("penetrate", count), &count, |b, &count| {
            b.iter(|| {
                let mut world = prepare_world(count, true);
                for _ in 0..10 {
                    world.step(black_box(DT), &scene);
                }
                black_box(world.len())
            })
        });
    }
    group.finish();
}

fn bench_raycast(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_cast");
    for &walls in &[10usize, 100, 1000] {
        let scene = prepare_scene(walls);
        let ignore = IgnoreSet::new();
        group.bench_with_input(BenchmarkId::new("walls", walls), &walls, |b, _| {
            b.iter(|| {
                black_box(scene.cast(
                    black_box(Vec3::new(0.0, 5.0, 0.0)),
                    Vec3::new(0.0, 0.0, 100.0),
                    &ignore,
                ))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frame, bench_raycast);
criterion_main!(benches);
