//! Composition-based ECS: entities with optional components, capability
//! tags, and the combinatorial [`System`] dispatcher.
//!
//! # Invariants
//! - Every entity id comes from the process-wide registry and is never reused.
//! - Capability checks go through [`ComponentSet`], never through types.
//! - A system's arity is fixed at construction and is at least 1.
//! - A system never hands its action an entity rejected by its predicate.

pub mod combinatorics;
mod component;
mod entity;
mod system;

pub use combinatorics::{Combinations, Permutations};
pub use component::{
    Camera, Collider, ComponentKind, ComponentSet, Name, Texture, TileWrap, Velocity,
};
pub use entity::Entity;
pub use system::{ConfigurationError, Predicate, Symmetry, System};

pub fn crate_info() -> &'static str {
    "paperplane-ecs v0.1.0"
}
