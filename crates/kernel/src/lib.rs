//! World Kernel: the live entity collection and the systems that step it.
//!
//! # Invariants
//! - The world holds at most one entity per id; removal validates every id
//!   before anything is deleted.
//! - Queries return snapshots and never mutate.
//! - Systems only see entities their predicates accept.
//! - Touching polygons do not collide.

pub mod systems;
pub mod world;

pub use systems::{
    CameraView, Collision, DetectCollisions, DrawCommand, Move, Outline, Parallax, Render,
    VisualizePolygons, polygons_overlap,
};
pub use world::{NotFoundError, World};

pub fn crate_info() -> &'static str {
    "paperplane-kernel v0.1.0"
}
