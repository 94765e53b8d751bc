use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide source of entity ids. Ids are handed out once and never recycled.
static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for an entity.
///
/// Ids come from a monotonically increasing process-wide counter, so two
/// entities never share an id even after one of them has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Allocate the next id from the registry.
    pub fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rotate `v` about the origin by `degrees`.
///
/// Positive angles turn +x towards +y: `(x, y) -> (x cos - y sin, x sin + y cos)`.
/// Coordinates are screen coordinates with y growing downward, so a positive
/// angle turns clockwise on screen. Every rotation in the workspace goes
/// through this convention.
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Planar transform: position plus rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f32,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_uniqueness() {
        let ids: Vec<EntityId> = (0..1000).map(|_| EntityId::next()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
    }

    #[test]
    fn entity_ids_are_monotonic() {
        let a = EntityId::next();
        let b = EntityId::next();
        assert!(b > a);
    }

    #[test]
    fn transform_default_is_origin() {
        let t = Transform::default();
        assert_eq!(t.position, Vec2::ZERO);
        assert_eq!(t.rotation, 0.0);
    }

    #[test]
    fn quarter_turn_points_down_the_screen() {
        let v = rotate_degrees(Vec2::X, 90.0);
        assert!((v - Vec2::Y).length() < 1e-6);
        // A negative turn points the nose up, toward the negative-y ceiling.
        let climb = rotate_degrees(Vec2::X, -30.0);
        assert!(climb.y < 0.0);
    }
}
