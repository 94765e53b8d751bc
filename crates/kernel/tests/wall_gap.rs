use std::collections::BTreeSet;

use glam::Vec2;
use paperplane_common::{Polygon, Transform};
use paperplane_ecs::{Camera, Collider, Entity, Velocity};
use paperplane_kernel::{DetectCollisions, Move, World};

const CRATE: Vec2 = Vec2::new(80.0, 80.0);

fn plane(position: Vec2) -> Entity {
    Entity::new()
        .with_transform(Transform::at(position))
        .with_velocity(Velocity {
            linear: Vec2::new(10.0, 0.0),
            angular: 0.0,
        })
        .with_collider(Collider::new([Polygon::new([
            Vec2::new(30.0, 0.0),
            Vec2::new(-26.0, -6.0),
            Vec2::new(-30.0, 6.0),
        ])]))
}

fn wall(x: f32, gap: u32) -> Entity {
    let half_w = CRATE.x / 2.0;
    let half_h = CRATE.y * 7.0 / 2.0;
    let gap_top = -half_h + CRATE.y * gap as f32;
    let gap_bottom = -half_h + CRATE.y * (gap + 1) as f32;
    Entity::new()
        .with_transform(Transform::at(Vec2::new(x, 0.0)))
        .with_collider(Collider::new([
            Polygon::rect(Vec2::new(-half_w, -half_h), Vec2::new(half_w, gap_top)),
            Polygon::rect(Vec2::new(-half_w, gap_bottom), Vec2::new(half_w, half_h)),
        ]))
}

#[test]
fn plane_inside_gap_does_not_collide() {
    let mut world = World::new();
    world.add(Entity::new().with_camera(Camera::default()));
    world.add(plane(Vec2::new(500.0, 0.0)));
    world.add(wall(500.0, 3));

    assert!(DetectCollisions::new().run_world(&world).is_empty());
}

#[test]
fn plane_on_top_segment_collides_once() {
    let mut world = World::new();
    let plane_id = world.add(plane(Vec2::new(500.0, -100.0)));
    let wall_id = world.add(wall(500.0, 3));

    let hits = DetectCollisions::new().run_world(&world);
    assert_eq!(hits.len(), 1);
    assert_eq!((hits[0].first, hits[0].second), (plane_id, wall_id));
    assert_eq!(hits[0].polygons, BTreeSet::from([(0, 0)]));
}

#[test]
fn flying_into_the_wall_is_detected() {
    let mut world = World::new();
    let plane_id = world.add(plane(Vec2::new(300.0, -100.0)));
    let wall_id = world.add(wall(500.0, 3));
    let step = Move::new();
    let detect = DetectCollisions::new();

    let mut frames = 0;
    while detect.run_world(&world).is_empty() {
        step.run(&mut world);
        frames += 1;
        assert!(frames < 100, "plane never reached the wall");
    }
    // Nose at x + 30 meets the wall face at 460.
    let x = world.get_one(plane_id).unwrap().transform.unwrap().position.x;
    assert!(x + 30.0 > 460.0);
    assert!(world.contains(wall_id));
}

#[test]
fn removed_entities_are_gone_from_queries() {
    let mut world = World::new();
    let id = world.add(wall(0.0, 1));
    world.remove(&[id]).unwrap();
    assert!(world.query(|e| e.id() == id).is_empty());
    assert!(world.get_one(id).is_err());
    assert!(DetectCollisions::new().run_world(&world).is_empty());
}
