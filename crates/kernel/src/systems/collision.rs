use paperplane_common::{EntityId, Polygon, Transform};
use paperplane_ecs::{ComponentKind, ComponentSet, Entity, Symmetry, System};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::world::World;

/// Two entities whose colliders overlap.
///
/// `polygons` holds every overlapping `(index in first, index in second)`
/// pair of collider polygons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub first: EntityId,
    pub second: EntityId,
    pub polygons: BTreeSet<(usize, usize)>,
}

impl Collision {
    pub fn involves(&self, id: EntityId) -> bool {
        self.first == id || self.second == id
    }

    /// The other entity of the pair, if `id` is one of them.
    pub fn partner_of(&self, id: EntityId) -> Option<EntityId> {
        if self.first == id {
            Some(self.second)
        } else if self.second == id {
            Some(self.first)
        } else {
            None
        }
    }
}

type CollisionAction = fn(&[&Entity], &()) -> Collision;

/// Pairwise collision detection between every two entities that carry a
/// transform and a collider.
///
/// Each unordered pair is tested once. Polygons are stored relative to their
/// entity's anchor, so per pair the first entity's polygons are rotated in
/// place and the second's are rotated and then shifted by the difference of
/// the two positions. Pairs without any overlapping polygon are dropped.
#[derive(Debug)]
pub struct DetectCollisions {
    system: System<CollisionAction>,
}

impl DetectCollisions {
    pub fn new() -> Self {
        let system = System::pairwise(
            "detect-collisions",
            Symmetry::Combinations,
            check_entity_collision as CollisionAction,
        )
        .requiring(ComponentSet::of(&[
            ComponentKind::Transform,
            ComponentKind::Collider,
        ]));
        Self { system }
    }

    /// Colliding pairs among `entities`, in pair generation order.
    pub fn run<'e>(&self, entities: impl IntoIterator<Item = &'e Entity>) -> Vec<Collision> {
        let collisions: Vec<Collision> = self
            .system
            .invoke(entities, &())
            .into_iter()
            .filter(|collision| !collision.polygons.is_empty())
            .collect();
        if !collisions.is_empty() {
            tracing::debug!(count = collisions.len(), "collisions detected");
        }
        collisions
    }

    /// Colliding pairs among every entity in `world`.
    pub fn run_world(&self, world: &World) -> Vec<Collision> {
        self.run(world.iter())
    }
}

impl Default for DetectCollisions {
    fn default() -> Self {
        Self::new()
    }
}

fn collider_polygons(entity: &Entity) -> &[Polygon] {
    entity
        .collider
        .as_ref()
        .map(|collider| collider.polygons.as_slice())
        .unwrap_or_default()
}

fn check_entity_collision(pair: &[&Entity], _: &()) -> Collision {
    let (first, second) = (pair[0], pair[1]);
    let first_transform = first.transform.unwrap_or_default();
    let second_transform: Transform = second.transform.unwrap_or_default();
    let offset = second_transform.position - first_transform.position;

    // Second entity's polygons expressed in the first entity's frame.
    let placed: Vec<Polygon> = collider_polygons(second)
        .iter()
        .map(|p| p.rotate(second_transform.rotation).translate(offset))
        .collect();

    let mut polygons = BTreeSet::new();
    for (i, local) in collider_polygons(first).iter().enumerate() {
        let rotated = local.rotate(first_transform.rotation);
        for (j, other) in placed.iter().enumerate() {
            if polygons_overlap(&rotated, other) {
                polygons.insert((i, j));
            }
        }
    }

    Collision {
        first: first.id(),
        second: second.id(),
        polygons,
    }
}

/// Separating Axis Theorem test for two convex polygons.
///
/// Every edge normal of either polygon is a candidate axis. The polygons are
/// disjoint iff the vertex projections onto some candidate axis do not
/// overlap. Polygons that only touch (zero-width overlap) are reported as
/// disjoint. Results for non-convex polygons are unspecified.
pub fn polygons_overlap(a: &Polygon, b: &Polygon) -> bool {
    !a.surface_normals()
        .chain(b.surface_normals())
        .any(|axis| separates(a, b, axis))
}

/// True when `axis` separates the projections of `a` and `b`.
///
/// The four interval bounds are stable-sorted by value; the axis separates
/// the polygons when the two lowest bounds belong to the same polygon. Equal
/// values keep the order `min a, max a, min b, max b`.
fn separates(a: &Polygon, b: &Polygon, axis: glam::Vec2) -> bool {
    let (min_a, max_a) = a.project(axis);
    let (min_b, max_b) = b.project(axis);
    let mut bounds = [(min_a, 0u8), (max_a, 0u8), (min_b, 1u8), (max_b, 1u8)];
    bounds.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(Ordering::Equal));
    bounds[0].1 == bounds[1].1
}
