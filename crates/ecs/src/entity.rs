use paperplane_common::{EntityId, Transform};
use serde::{Deserialize, Serialize};

use crate::component::{
    Camera, Collider, ComponentKind, ComponentSet, Name, Texture, TileWrap, Velocity,
};

/// A simulated object: a registry-assigned id plus optional components.
///
/// Capabilities are plain fields rather than a type hierarchy. Attaching a
/// component that only makes sense with another one (velocity or colliders
/// without a transform, tile wrapping without a texture) attaches the
/// dependency with default values.
///
/// A clone, or a deserialized copy, is the same entity under the same id, not
/// a new one. Adding it to a world replaces the original; use [`Entity::new`]
/// for a fresh id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    pub transform: Option<Transform>,
    pub velocity: Option<Velocity>,
    pub texture: Option<Texture>,
    pub tile_wrap: Option<TileWrap>,
    pub collider: Option<Collider>,
    pub camera: Option<Camera>,
    pub name: Option<Name>,
}

impl Entity {
    /// Create an entity with a fresh id and no components.
    pub fn new() -> Self {
        Self {
            id: EntityId::next(),
            transform: None,
            velocity: None,
            texture: None,
            tile_wrap: None,
            collider: None,
            camera: None,
            name: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.transform.get_or_insert_with(Transform::default);
        self.velocity = Some(velocity);
        self
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_tile_wrap(mut self, tile_wrap: TileWrap) -> Self {
        self.texture.get_or_insert_with(|| Texture {
            size: tile_wrap.view_size,
            ..Texture::default()
        });
        self.tile_wrap = Some(tile_wrap);
        self
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.transform.get_or_insert_with(Transform::default);
        self.collider = Some(collider);
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Name(name.into()));
        self
    }

    /// The set of component kinds currently attached.
    pub fn components(&self) -> ComponentSet {
        let present = [
            (ComponentKind::Transform, self.transform.is_some()),
            (ComponentKind::Velocity, self.velocity.is_some()),
            (ComponentKind::Texture, self.texture.is_some()),
            (ComponentKind::TileWrap, self.tile_wrap.is_some()),
            (ComponentKind::Collider, self.collider.is_some()),
            (ComponentKind::Camera, self.camera.is_some()),
            (ComponentKind::Name, self.name.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(kind, attached)| attached.then_some(kind))
            .collect()
    }

    /// True when every kind in `required` is attached.
    pub fn has(&self, required: ComponentSet) -> bool {
        self.components().contains_all(required)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_ref().is_some_and(|n| n.0 == name)
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn new_entities_get_distinct_ids() {
        let a = Entity::new();
        let b = Entity::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn clone_keeps_identity() {
        let a = Entity::new();
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn bare_entity_has_no_components() {
        assert!(Entity::new().components().is_empty());
    }

    #[test]
    fn velocity_implies_transform() {
        let e = Entity::new().with_velocity(Velocity::default());
        assert!(e.has(ComponentSet::of(&[
            ComponentKind::Transform,
            ComponentKind::Velocity
        ])));
    }

    #[test]
    fn collider_keeps_existing_transform() {
        let t = Transform::at(Vec2::new(4.0, 2.0));
        let e = Entity::new()
            .with_transform(t)
            .with_collider(Collider::default());
        assert_eq!(e.transform, Some(t));
        assert!(e.components().contains(ComponentKind::Collider));
    }

    #[test]
    fn tile_wrap_implies_texture() {
        let wrap = TileWrap::new(Vec2::splat(10.0), Vec2::splat(30.0), true, true);
        let e = Entity::new().with_tile_wrap(wrap);
        assert_eq!(e.texture.map(|t| t.size), Some(Vec2::splat(30.0)));
    }

    #[test]
    fn name_lookup() {
        let e = Entity::new().with_name("plane");
        assert!(e.is_named("plane"));
        assert!(!e.is_named("crate-wall"));
        assert!(!Entity::new().is_named("plane"));
    }
}
