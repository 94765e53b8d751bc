use glam::Vec2;
use paperplane_ecs::{ComponentKind, ComponentSet, Entity, System};

use crate::world::World;

/// Per-call parallax parameters handed to the action.
#[derive(Debug, Clone, Copy)]
struct ParallaxFrame {
    origin: Vec2,
    factor: Vec2,
    camera: Vec2,
}

type ParallaxAction = fn(&mut [&mut Entity], &ParallaxFrame);

/// Scrolls tile-wrapped textures at a fraction of the camera's displacement
/// from `origin`, producing a parallax effect.
#[derive(Debug)]
pub struct Parallax {
    origin: Vec2,
    factor: Vec2,
    system: System<ParallaxAction>,
}

impl Parallax {
    pub fn new(origin: Vec2, factor: Vec2) -> Self {
        let system = System::unary("parallax", position_view as ParallaxAction)
            .requiring(ComponentSet::of(&[ComponentKind::TileWrap]));
        Self {
            origin,
            factor,
            system,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Update the view offset of every tile-wrapped entity for a camera at
    /// `camera`.
    pub fn run(&self, world: &mut World, camera: Vec2) -> usize {
        let frame = ParallaxFrame {
            origin: self.origin,
            factor: self.factor,
            camera,
        };
        self.system.invoke_mut(world.iter_mut(), &frame).len()
    }
}

fn position_view(entity: &mut [&mut Entity], frame: &ParallaxFrame) {
    let Some(wrap) = entity[0].tile_wrap.as_mut() else {
        return;
    };
    let shift = (frame.camera - frame.origin) * frame.factor;
    wrap.offset = Vec2::new(
        shift.x.rem_euclid(wrap.tile_size.x),
        shift.y.rem_euclid(wrap.tile_size.y),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperplane_ecs::TileWrap;

    fn background(world: &mut World) -> paperplane_common::EntityId {
        world.add(Entity::new().with_tile_wrap(TileWrap::new(
            Vec2::new(100.0, 50.0),
            Vec2::new(300.0, 50.0),
            true,
            false,
        )))
    }

    fn offset(world: &World, id: paperplane_common::EntityId) -> Vec2 {
        world.get_one(id).unwrap().tile_wrap.unwrap().offset
    }

    #[test]
    fn offset_scales_with_camera() {
        let mut world = World::new();
        let id = background(&mut world);
        let parallax = Parallax::new(Vec2::ZERO, Vec2::new(0.2, 0.0));
        assert_eq!(parallax.run(&mut world, Vec2::new(250.0, 40.0)), 1);
        assert!((offset(&world, id) - Vec2::new(50.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn offset_wraps_within_one_tile() {
        let mut world = World::new();
        let id = background(&mut world);
        let parallax = Parallax::new(Vec2::ZERO, Vec2::ONE);
        parallax.run(&mut world, Vec2::new(1234.0, 0.0));
        assert!((offset(&world, id).x - 34.0).abs() < 1e-3);
    }

    #[test]
    fn negative_displacement_wraps_to_positive() {
        let mut world = World::new();
        let id = background(&mut world);
        let parallax = Parallax::new(Vec2::new(100.0, 0.0), Vec2::ONE);
        parallax.run(&mut world, Vec2::new(70.0, 0.0));
        assert!((offset(&world, id).x - 70.0).abs() < 1e-4);
    }

    #[test]
    fn untiled_entities_are_ignored() {
        let mut world = World::new();
        world.add(Entity::new());
        let parallax = Parallax::new(Vec2::ZERO, Vec2::ONE);
        assert_eq!(parallax.run(&mut world, Vec2::ZERO), 0);
    }
}
