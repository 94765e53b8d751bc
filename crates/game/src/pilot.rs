//! Scripted pilots that turn observations into input events.

use serde::{Deserialize, Serialize};

use crate::actors::gap_center;
use crate::config::GameConfig;
use crate::flight::Observation;
use crate::scene::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PilotKind {
    /// Never presses; the plane noses down.
    #[default]
    Glide,
    /// Keeps the input held; the plane climbs to the ceiling.
    Hold,
    /// Steers toward the gap of the next wall.
    Seek,
}

/// Frames of velocity the seeking pilot looks ahead.
const LOOKAHEAD: f32 = 6.0;
/// Half the plane's nose-to-tail length.
const PLANE_REACH: f32 = 30.0;

/// A pilot holds the input between frames and reports only changes.
#[derive(Debug, Clone)]
pub struct Pilot {
    kind: PilotKind,
    pressed: bool,
}

impl Pilot {
    pub fn new(kind: PilotKind) -> Self {
        Self {
            kind,
            pressed: false,
        }
    }

    pub fn kind(&self) -> PilotKind {
        self.kind
    }

    /// Whether the input should be held this frame.
    pub fn wants_climb(&self, observation: &Observation, config: &GameConfig) -> bool {
        match self.kind {
            PilotKind::Glide => false,
            PilotKind::Hold => true,
            PilotKind::Seek => {
                let plane_x = observation.plane_position.x;
                let target = observation
                    .walls
                    .iter()
                    .find(|wall| wall.x + config.crate_size.x / 2.0 + PLANE_REACH > plane_x)
                    .map(|wall| gap_center(config.crate_size, wall.gap_slot))
                    .unwrap_or(0.0);
                let predicted =
                    observation.plane_position.y + observation.plane_velocity.y * LOOKAHEAD;
                predicted > target
            }
        }
    }

    /// Press or release events needed to match this frame's decision.
    pub fn events(&mut self, observation: &Observation, config: &GameConfig) -> Vec<InputEvent> {
        let climb = self.wants_climb(observation, config);
        if climb == self.pressed {
            return Vec::new();
        }
        self.pressed = climb;
        vec![if climb {
            InputEvent::PrimaryDown
        } else {
            InputEvent::PrimaryUp
        }]
    }
}
