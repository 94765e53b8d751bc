//! Shared types: entity identity, planar transforms, convex polygon geometry.
//!
//! # Invariants
//! - Entity ids are unique for the lifetime of the process and never reused.
//! - Polygons are immutable; every geometric operation returns a new value.
//! - All rotations are in degrees and follow [`rotate_degrees`].

mod polygon;
mod types;

pub use polygon::Polygon;
pub use types::{EntityId, Transform, rotate_degrees};
