use std::hint::black_box;
use std::time::Instant;

use glam::Vec2;
use paperplane_common::{Polygon, Transform};
use paperplane_ecs::{Collider, Entity, Velocity};
use paperplane_kernel::{DetectCollisions, Move, World, polygons_overlap};

fn make_world(entity_count: usize, spacing: f32) -> World {
    let mut world = World::new();
    let side = (entity_count as f32).sqrt().ceil() as usize;
    for i in 0..entity_count {
        let x = (i % side) as f32 * spacing;
        let y = (i / side) as f32 * spacing;
        world.add(
            Entity::new()
                .with_transform(Transform::at(Vec2::new(x, y)).with_rotation(i as f32 * 7.0))
                .with_velocity(Velocity {
                    linear: Vec2::new(1.0, 0.0),
                    angular: 0.5,
                })
                .with_collider(Collider::new([
                    Polygon::rect(Vec2::splat(-5.0), Vec2::splat(5.0)),
                    Polygon::new([
                        Vec2::new(30.0, 0.0),
                        Vec2::new(-26.0, -6.0),
                        Vec2::new(-30.0, 6.0),
                    ]),
                ])),
        );
    }
    world
}

fn bench_polygons_overlap(iterations: usize) {
    let a = Polygon::rect(Vec2::splat(-1.0), Vec2::splat(1.0));
    let b = a.rotate(30.0).translate(Vec2::new(1.5, 0.5));

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(polygons_overlap(black_box(&a), black_box(&b)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  square pair ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_detect(entity_count: usize, iterations: usize) {
    let world = make_world(entity_count, 20.0);
    let detector = DetectCollisions::new();

    let start = Instant::now();
    let mut hits = 0;
    for _ in 0..iterations {
        hits = black_box(detector.run_world(black_box(&world))).len();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  detect ({entity_count} entities, {hits} hits, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_move(entity_count: usize, iterations: usize) {
    let mut world = make_world(entity_count, 20.0);
    let system = Move::new();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(system.run(black_box(&mut world)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  move ({entity_count} entities, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Collision Benchmarks ===\n");

    println!("SAT polygon test:");
    bench_polygons_overlap(100_000);

    println!("\nPairwise detection:");
    bench_detect(10, 1000);
    bench_detect(50, 100);
    bench_detect(200, 10);

    println!("\nMove system:");
    bench_move(100, 1000);
    bench_move(1000, 100);

    println!("\n=== Done ===");
}
