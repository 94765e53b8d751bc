use paperplane_ecs::{ComponentKind, ComponentSet, Entity, System};

use crate::world::World;

type MoveAction = fn(&mut [&mut Entity], &());

/// Advances every entity with a velocity by one step.
#[derive(Debug)]
pub struct Move {
    system: System<MoveAction>,
}

impl Move {
    pub fn new() -> Self {
        let system = System::unary("move", update_transform as MoveAction).requiring(
            ComponentSet::of(&[ComponentKind::Transform, ComponentKind::Velocity]),
        );
        Self { system }
    }

    /// Move every qualifying entity in `world`. Returns how many moved.
    pub fn run(&self, world: &mut World) -> usize {
        self.system.invoke_mut(world.iter_mut(), &()).len()
    }
}

impl Default for Move {
    fn default() -> Self {
        Self::new()
    }
}

fn update_transform(entity: &mut [&mut Entity], _: &()) {
    let entity = &mut *entity[0];
    let Some(velocity) = entity.velocity else {
        return;
    };
    if let Some(transform) = entity.transform.as_mut() {
        transform.rotation += velocity.angular;
        transform.position += velocity.linear;
    }
}
