use glam::Vec2;
use paperplane_common::{EntityId, Transform, rotate_degrees};
use paperplane_ecs::{ComponentKind, Entity};
use paperplane_kernel::{
    CameraView, DetectCollisions, DrawCommand, Move, NotFoundError, Outline, Parallax, Render,
    VisualizePolygons, World,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::actors::{self, CRATE_WALL, GAP_SLOTS};
use crate::config::{ConfigError, GameConfig};
use crate::scene::InputEvent;

/// Errors from stepping a scene.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error("entity {entity} has no {component:?} component")]
    MissingComponent {
        entity: EntityId,
        component: ComponentKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Straight flight before the player takes control.
    InitialCruise,
    Acrobatic,
}

/// How a flight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Crashed { score: u32 },
    Quit,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub frame: u64,
    pub score: u32,
    pub draw_list: Vec<DrawCommand>,
    pub outlines: Vec<Outline>,
}

/// A numeric summary of the flight, as seen by a pilot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub plane_position: Vec2,
    pub plane_velocity: Vec2,
    /// The nearest walls by x, at most [`Flight::OBSERVED_WALLS`].
    pub walls: Vec<WallObservation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallObservation {
    pub x: f32,
    pub gap_slot: u32,
}

/// The playable scene: a plane flying right through an endless run of crate
/// walls.
///
/// The flight starts with a short straight cruise. After that the plane
/// pitches up while the primary input is held and down otherwise, bounces off
/// the ceiling, and crashes on the floor or on any wall. Each wall left behind
/// scores a point and speeds the plane up.
#[derive(Debug)]
pub struct Flight {
    config: GameConfig,
    world: World,
    camera: EntityId,
    background: EntityId,
    plane: EntityId,
    /// Gap slot of every live wall.
    walls: BTreeMap<EntityId, u32>,
    phase: Phase,
    distance_for_next_wall: f32,
    score: u32,
    frame: u64,
    climbing: bool,
    outcome: Option<Outcome>,
    rng: SmallRng,
    movement: Move,
    collisions: DetectCollisions,
    parallax: Parallax,
    render: Render,
    outlines: VisualizePolygons,
}

impl Flight {
    pub const OBSERVED_WALLS: usize = 2;

    /// A new flight seeded from `config.seed`, or from entropy without one.
    /// Fails when the config does not validate.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GameConfig, rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = World::new();
        let camera = world.add(actors::camera(&config));
        let background = actors::background(&config);
        let parallax_origin = background
            .transform
            .map(|t| t.position)
            .unwrap_or_default();
        let background = world.add(background);
        let plane = world.add(actors::plane(&config));
        let parallax = Parallax::new(parallax_origin, config.parallax_factor);

        Ok(Self {
            config,
            world,
            camera,
            background,
            plane,
            walls: BTreeMap::new(),
            phase: Phase::InitialCruise,
            distance_for_next_wall: 0.0,
            score: 0,
            frame: 0,
            climbing: false,
            outcome: None,
            rng,
            movement: Move::new(),
            collisions: DetectCollisions::new(),
            parallax,
            render: Render::new(),
            outlines: VisualizePolygons::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn plane_id(&self) -> EntityId {
        self.plane
    }

    pub fn camera_id(&self) -> EntityId {
        self.camera
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Steps taken so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_climbing(&self) -> bool {
        self.climbing
    }

    pub fn distance_for_next_wall(&self) -> f32 {
        self.distance_for_next_wall
    }

    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match event {
                InputEvent::PrimaryDown => self.climbing = true,
                InputEvent::PrimaryUp => self.climbing = false,
                InputEvent::Quit => {
                    if self.outcome.is_none() {
                        tracing::info!(frame = self.frame, "flight quit");
                        self.outcome = Some(Outcome::Quit);
                    }
                }
            }
        }
    }

    /// Advance the flight by one frame. A finished flight no longer changes.
    pub fn step(&mut self) -> Result<(), GameError> {
        if self.is_over() {
            return Ok(());
        }
        self.frame += 1;
        let _span = tracing::trace_span!("flight_step", frame = self.frame).entered();
        match self.phase {
            Phase::InitialCruise => self.initial_cruise(),
            Phase::Acrobatic => self.acrobatic_flight(),
        }
    }

    fn initial_cruise(&mut self) -> Result<(), GameError> {
        self.follow_plane()?;
        self.movement.run(&mut self.world);
        self.place_background()?;

        let x = self.plane_transform()?.position.x;
        if x > self.config.cruise_distance {
            self.distance_for_next_wall = x;
            self.phase = Phase::Acrobatic;
            tracing::debug!(frame = self.frame, x, "cruise over");
        }
        Ok(())
    }

    /// One frame of player-controlled flight. The frame stops at the first
    /// rule that ends the game.
    fn acrobatic_flight(&mut self) -> Result<(), GameError> {
        if self.steer()? {
            self.end_game("floor");
            return Ok(());
        }

        let plane_x = self.plane_transform()?.position.x;
        if plane_x > self.distance_for_next_wall {
            let (near, far) = self.config.wall_spacing_px();
            self.distance_for_next_wall += self.rng.gen_range(near..=far) as f32;
            let camera_x = self.transform_of(self.camera)?.position.x;
            let gap_slot = self.rng.gen_range(GAP_SLOTS);
            self.spawn_wall(camera_x + self.config.window_size.x, gap_slot);
        }

        self.follow_plane()?;
        self.movement.run(&mut self.world);
        self.place_background()?;

        if let Some(wall) = self.passed_wall()? {
            self.world.remove(&[wall])?;
            self.walls.remove(&wall);
            let plane = self.world.get_mut(self.plane)?;
            let rotation = plane.transform.map(|t| t.rotation).unwrap_or_default();
            if let Some(velocity) = plane.velocity.as_mut() {
                velocity.linear += rotate_degrees(Vec2::new(self.config.speed_boost, 0.0), rotation);
            }
            self.score += 1;
            tracing::info!(score = self.score, "wall passed");
        }

        let crashed = self
            .collisions
            .run_world(&self.world)
            .iter()
            .filter_map(|collision| collision.partner_of(self.plane))
            .any(|other| self.walls.contains_key(&other));
        if crashed {
            self.end_game("wall");
        }
        Ok(())
    }

    /// Apply the pitch rules and the ceiling bounce. Returns true when the
    /// plane has dropped below the floor.
    fn steer(&mut self) -> Result<bool, GameError> {
        let ceiling = self.config.ceiling();
        let floor = self.config.floor();
        let plane_id = self.plane;
        let climbing = self.climbing;
        let (max_angle, pitch_rate, recover_rate) = (
            self.config.max_angle,
            self.config.pitch_rate,
            self.config.recover_rate,
        );

        let plane = self.world.get_mut(plane_id)?;
        let missing = if plane.transform.is_none() {
            ComponentKind::Transform
        } else {
            ComponentKind::Velocity
        };
        let (Some(transform), Some(velocity)) = (plane.transform.as_mut(), plane.velocity.as_mut())
        else {
            return Err(GameError::MissingComponent {
                entity: plane_id,
                component: missing,
            });
        };

        let pitch = remap_rotation(transform.rotation);
        velocity.angular = if climbing {
            if pitch < -max_angle { recover_rate } else { -pitch_rate }
        } else if pitch > max_angle {
            -recover_rate
        } else {
            pitch_rate
        };

        let mut below_floor = false;
        if transform.position.y < ceiling {
            transform.position.y = ceiling;
            velocity.linear.y = -velocity.linear.y;
        } else if transform.position.y > floor {
            below_floor = true;
        }

        velocity.linear = rotate_degrees(velocity.linear, velocity.angular);
        transform.rotation = velocity.linear.y.atan2(velocity.linear.x).to_degrees();
        Ok(below_floor)
    }

    /// The first wall, in spawn order, that has scrolled fully past the camera.
    fn passed_wall(&self) -> Result<Option<EntityId>, GameError> {
        let limit = self.transform_of(self.camera)?.position.x - self.config.crate_size.x;
        Ok(self
            .world
            .query(|e| {
                e.is_named(CRATE_WALL) && e.transform.is_some_and(|t| t.position.x < limit)
            })
            .first()
            .map(|e| e.id()))
    }

    /// Add a crate wall at `x`. Used by the spawner; exposed for scripted setups.
    pub fn spawn_wall(&mut self, x: f32, gap_slot: u32) -> EntityId {
        let id = self
            .world
            .add(actors::crate_wall(&self.config, x, gap_slot));
        self.walls.insert(id, gap_slot);
        tracing::debug!(%id, x, gap_slot, "wall spawned");
        id
    }

    fn end_game(&mut self, cause: &str) {
        tracing::info!(score = self.score, frame = self.frame, cause, "plane crashed");
        self.outcome = Some(Outcome::Crashed { score: self.score });
    }

    /// Camera tracks the plane horizontally and stays level.
    fn follow_plane(&mut self) -> Result<(), GameError> {
        let x = self.plane_transform()?.position.x;
        set_position(self.world.get_mut(self.camera)?, Vec2::new(x, 0.0));
        Ok(())
    }

    /// Background top-left sits at the screen's top-left.
    fn place_background(&mut self) -> Result<(), GameError> {
        let view = self.camera_view()?;
        set_position(
            self.world.get_mut(self.background)?,
            view.position - view.anchor,
        );
        Ok(())
    }

    fn camera_view(&self) -> Result<CameraView, GameError> {
        CameraView::of(self.world.get_one(self.camera)?).ok_or(GameError::MissingComponent {
            entity: self.camera,
            component: ComponentKind::Camera,
        })
    }

    fn plane_transform(&self) -> Result<Transform, GameError> {
        self.transform_of(self.plane)
    }

    fn transform_of(&self, id: EntityId) -> Result<Transform, GameError> {
        self.world
            .get_one(id)?
            .transform
            .ok_or(GameError::MissingComponent {
                entity: id,
                component: ComponentKind::Transform,
            })
    }

    /// Scroll the background and build the draw list for the current state.
    pub fn frame(&mut self) -> Result<Frame, GameError> {
        let view = self.camera_view()?;
        self.parallax.run(&mut self.world, view.position);
        Ok(Frame {
            frame: self.frame,
            score: self.score,
            draw_list: self.render.run(&self.world, &view),
            outlines: self.outlines.run(&self.world, &view),
        })
    }

    pub fn observation(&self) -> Result<Observation, GameError> {
        let plane = self.world.get_one(self.plane)?;
        let mut walls = self
            .walls
            .iter()
            .map(|(&id, &gap_slot)| {
                Ok(WallObservation {
                    x: self.transform_of(id)?.position.x,
                    gap_slot,
                })
            })
            .collect::<Result<Vec<_>, GameError>>()?;
        walls.sort_by(|a, b| a.x.total_cmp(&b.x));
        walls.truncate(Self::OBSERVED_WALLS);

        Ok(Observation {
            plane_position: plane.transform.map(|t| t.position).unwrap_or_default(),
            plane_velocity: plane.velocity.map(|v| v.linear).unwrap_or_default(),
            walls,
        })
    }
}

/// Map degrees onto [-180, 180).
fn remap_rotation(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

fn set_position(entity: &mut Entity, position: Vec2) {
    entity
        .transform
        .get_or_insert_with(Transform::default)
        .position = position;
}
