use glam::Vec2;
use paperplane_common::Polygon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear and angular velocity, applied once per simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub linear: Vec2,
    /// Degrees per step.
    pub angular: f32,
}

/// Render metadata. Pixels live with the presentation layer; the core only
/// needs the sprite size, its rotation anchor, and its draw order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Texture {
    pub size: Vec2,
    /// Offset from the sprite center to the point of rotation.
    pub anchor: Vec2,
    /// Lower heights draw first.
    pub render_height: i32,
}

/// A texture tiled into a strip larger than the visible view so it can be
/// scrolled without showing an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileWrap {
    pub tile_size: Vec2,
    pub view_size: Vec2,
    pub wrap_horizontal: bool,
    pub wrap_vertical: bool,
    /// Top-left corner of the visible view inside the tiled strip.
    pub offset: Vec2,
}

impl TileWrap {
    pub fn new(tile_size: Vec2, view_size: Vec2, wrap_horizontal: bool, wrap_vertical: bool) -> Self {
        Self {
            tile_size,
            view_size,
            wrap_horizontal,
            wrap_vertical,
            offset: Vec2::ZERO,
        }
    }

    /// Number of tiles the strip needs along each axis. A wrapped axis gets
    /// one extra tile so any offset inside a single tile stays covered.
    pub fn expanded_tiles(&self) -> (u32, u32) {
        let extra = |wrapped: bool| if wrapped { 2 } else { 1 };
        (
            (self.view_size.x / self.tile_size.x).floor() as u32 + extra(self.wrap_horizontal),
            (self.view_size.y / self.tile_size.y).floor() as u32 + extra(self.wrap_vertical),
        )
    }
}

/// Convex collision regions, in coordinates relative to the entity anchor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Collider {
    pub polygons: Vec<Polygon>,
}

impl Collider {
    pub fn new(polygons: impl IntoIterator<Item = Polygon>) -> Self {
        Self {
            polygons: polygons.into_iter().collect(),
        }
    }
}

/// Marks the viewpoint entity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Screen position that the camera's world position maps to.
    pub anchor: Vec2,
    pub viewport: Vec2,
}

/// Human-readable name component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

/// The closed set of component kinds an entity can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    Transform,
    Velocity,
    Texture,
    TileWrap,
    Collider,
    Camera,
    Name,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::Transform,
        ComponentKind::Velocity,
        ComponentKind::Texture,
        ComponentKind::TileWrap,
        ComponentKind::Collider,
        ComponentKind::Camera,
        ComponentKind::Name,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of component kinds, used for capability checks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ComponentSet(u8);

impl ComponentSet {
    pub const EMPTY: ComponentSet = ComponentSet(0);

    pub fn of(kinds: &[ComponentKind]) -> Self {
        kinds.iter().fold(Self::EMPTY, |set, kind| set.with(*kind))
    }

    pub fn with(self, kind: ComponentKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub fn without(self, kind: ComponentKind) -> Self {
        Self(self.0 & !kind.bit())
    }

    pub fn contains(self, kind: ComponentKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// True when every kind in `other` is also in `self`.
    pub fn contains_all(self, other: ComponentSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl fmt::Debug for ComponentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<ComponentKind> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = ComponentKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, kind| set.with(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_membership() {
        let set = ComponentSet::of(&[ComponentKind::Transform, ComponentKind::Collider]);
        assert!(set.contains(ComponentKind::Transform));
        assert!(set.contains(ComponentKind::Collider));
        assert!(!set.contains(ComponentKind::Velocity));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn contains_all_is_subset_check() {
        let full = ComponentSet::of(&ComponentKind::ALL);
        let pair = ComponentSet::of(&[ComponentKind::Texture, ComponentKind::Transform]);
        assert!(full.contains_all(pair));
        assert!(!pair.contains_all(full));
        assert!(pair.contains_all(ComponentSet::EMPTY));
    }

    #[test]
    fn without_removes_kind() {
        let set = ComponentSet::of(&[ComponentKind::Camera, ComponentKind::Name]);
        let set = set.without(ComponentKind::Camera);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![ComponentKind::Name]);
    }

    #[test]
    fn expanded_tiles_adds_wrap_margin() {
        let wrap = TileWrap::new(Vec2::new(100.0, 50.0), Vec2::new(250.0, 100.0), true, false);
        assert_eq!(wrap.expanded_tiles(), (4, 3));
    }
}
