use glam::Vec2;
use paperplane_common::{EntityId, Polygon, rotate_degrees};
use paperplane_ecs::{ComponentKind, ComponentSet, Entity, System};
use serde::{Deserialize, Serialize};

use crate::world::World;

/// Where the camera sits in the world and where that point lands on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vec2,
    pub anchor: Vec2,
}

impl CameraView {
    /// The view of an entity carrying both a transform and a camera component.
    pub fn of(entity: &Entity) -> Option<Self> {
        let transform = entity.transform?;
        let camera = entity.camera?;
        Some(Self {
            position: transform.position,
            anchor: camera.anchor,
        })
    }

    /// Screen position of a world point.
    pub fn to_screen(&self, world_point: Vec2) -> Vec2 {
        world_point - self.position + self.anchor
    }
}

/// One sprite to draw, in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub entity: EntityId,
    pub render_height: i32,
    /// Screen position of the sprite center.
    pub center: Vec2,
    pub rotation: f32,
    pub size: Vec2,
}

type DrawAction = fn(&[&Entity], &CameraView) -> DrawCommand;

/// Builds the draw list for every textured entity other than the camera.
#[derive(Debug)]
pub struct Render {
    system: System<DrawAction>,
}

impl Render {
    pub fn new() -> Self {
        let required = ComponentSet::of(&[ComponentKind::Transform, ComponentKind::Texture]);
        let system = System::unary("render", draw_command as DrawAction)
            .with_predicate(move |entity| entity.has(required) && entity.camera.is_none());
        Self { system }
    }

    /// Draw commands ordered by render height, lowest first. Entities with
    /// equal heights keep world order.
    pub fn run(&self, world: &World, camera: &CameraView) -> Vec<DrawCommand> {
        let mut commands = self.system.invoke(world.iter(), camera);
        commands.sort_by_key(|command| command.render_height);
        commands
    }
}

impl Default for Render {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_command(entity: &[&Entity], camera: &CameraView) -> DrawCommand {
    let entity = entity[0];
    let transform = entity.transform.unwrap_or_default();
    let texture = entity.texture.unwrap_or_default();
    DrawCommand {
        entity: entity.id(),
        render_height: texture.render_height,
        center: camera.to_screen(
            transform.position - rotate_degrees(texture.anchor, transform.rotation),
        ),
        rotation: transform.rotation,
        size: texture.size,
    }
}

/// A collider polygon placed in screen space, for debug overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub entity: EntityId,
    pub polygon: Polygon,
}

type OutlineAction = fn(&[&Entity], &CameraView) -> Vec<Outline>;

/// Places every collider polygon on screen.
#[derive(Debug)]
pub struct VisualizePolygons {
    system: System<OutlineAction>,
}

impl VisualizePolygons {
    pub fn new() -> Self {
        let system = System::unary("visualize-polygons", outlines as OutlineAction).requiring(
            ComponentSet::of(&[ComponentKind::Transform, ComponentKind::Collider]),
        );
        Self { system }
    }

    pub fn run(&self, world: &World, camera: &CameraView) -> Vec<Outline> {
        self.system
            .invoke(world.iter(), camera)
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Default for VisualizePolygons {
    fn default() -> Self {
        Self::new()
    }
}

fn outlines(entity: &[&Entity], camera: &CameraView) -> Vec<Outline> {
    let entity = entity[0];
    let transform = entity.transform.unwrap_or_default();
    let shift = camera.to_screen(transform.position);
    entity
        .collider
        .iter()
        .flat_map(|collider| collider.polygons.iter())
        .map(|polygon| Outline {
            entity: entity.id(),
            polygon: polygon.rotate(transform.rotation).translate(shift),
        })
        .collect()
}
