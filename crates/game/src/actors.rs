//! Builders for the entities a flight is made of.

use glam::Vec2;
use paperplane_common::{Polygon, Transform};
use paperplane_ecs::{Camera, Collider, Entity, Texture, TileWrap, Velocity};
use std::ops::RangeInclusive;

use crate::config::GameConfig;

pub const PLANE: &str = "plane";
pub const CRATE_WALL: &str = "crate-wall";
pub const CAMERA: &str = "camera";
pub const BACKGROUND: &str = "background";

/// Crates stacked in one wall.
pub const CRATE_COUNT: u32 = 7;
/// Slots the gap may occupy. The top and bottom crates are always solid.
pub const GAP_SLOTS: RangeInclusive<u32> = 1..=5;

const BACKGROUND_HEIGHT: i32 = -1;
const PLANE_HEIGHT: i32 = 0;
const WALL_HEIGHT: i32 = 1;

/// The player's plane, flying right at `speed`.
pub fn plane(config: &GameConfig) -> Entity {
    Entity::new()
        .with_name(PLANE)
        .with_transform(Transform::default())
        .with_velocity(Velocity {
            linear: Vec2::new(config.plane_speed, 0.0),
            angular: 0.0,
        })
        .with_texture(Texture {
            size: config.plane_size,
            anchor: Vec2::ZERO,
            render_height: PLANE_HEIGHT,
        })
        .with_collider(Collider::new([plane_hull()]))
}

/// Collision triangle of the plane sprite, nose pointing along +x.
pub fn plane_hull() -> Polygon {
    Polygon::new([
        Vec2::new(30.0, 0.0),
        Vec2::new(-26.0, -6.0),
        Vec2::new(-30.0, 6.0),
    ])
}

/// A wall of crates centered at `(x, 0)` with one missing crate at
/// `gap_slot`, counted from the top.
pub fn crate_wall(config: &GameConfig, x: f32, gap_slot: u32) -> Entity {
    let size = config.crate_size;
    Entity::new()
        .with_name(CRATE_WALL)
        .with_transform(Transform::at(Vec2::new(x, 0.0)))
        .with_texture(Texture {
            size: Vec2::new(size.x, size.y * CRATE_COUNT as f32),
            anchor: Vec2::ZERO,
            render_height: WALL_HEIGHT,
        })
        .with_collider(Collider::new(wall_segments(size, gap_slot)))
}

/// The solid parts of a wall: everything above the gap and everything below.
pub fn wall_segments(crate_size: Vec2, gap_slot: u32) -> [Polygon; 2] {
    let half_w = crate_size.x / 2.0;
    let half_h = crate_size.y * CRATE_COUNT as f32 / 2.0;
    let gap_top = -half_h + crate_size.y * gap_slot as f32;
    let gap_bottom = -half_h + crate_size.y * (gap_slot + 1) as f32;
    [
        Polygon::new([
            Vec2::new(-half_w, -half_h),
            Vec2::new(-half_w, gap_top),
            Vec2::new(half_w, gap_top),
            Vec2::new(half_w, -half_h),
        ]),
        Polygon::new([
            Vec2::new(-half_w, gap_bottom),
            Vec2::new(-half_w, half_h),
            Vec2::new(half_w, half_h),
            Vec2::new(half_w, gap_bottom),
        ]),
    ]
}

/// World y of the middle of the gap.
pub fn gap_center(crate_size: Vec2, gap_slot: u32) -> f32 {
    -crate_size.y * CRATE_COUNT as f32 / 2.0 + crate_size.y * (gap_slot as f32 + 0.5)
}

pub fn camera(config: &GameConfig) -> Entity {
    Entity::new()
        .with_name(CAMERA)
        .with_transform(Transform::default())
        .with_camera(Camera {
            anchor: config.camera_anchor_px(),
            viewport: config.window_size,
        })
}

/// The scrolling backdrop, drawn beneath everything else.
pub fn background(config: &GameConfig) -> Entity {
    let size = config.background_size;
    Entity::new()
        .with_name(BACKGROUND)
        .with_transform(Transform::default())
        .with_texture(Texture {
            size,
            anchor: size * -0.5,
            render_height: BACKGROUND_HEIGHT,
        })
        .with_tile_wrap(TileWrap::new(size, size, true, false))
}
