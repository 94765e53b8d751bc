//! Plain Paper Plane game rules on top of the kernel: actor builders, the
//! flight scene, the scene manager, and scripted pilots.
//!
//! # Invariants
//! - A finished flight never changes again.
//! - Every crate wall in a flight's world has a recorded gap slot.
//! - Seeded flights fed the same events produce the same frames.

pub mod actors;
mod config;
mod flight;
mod pilot;
mod scene;

pub use config::{ConfigError, GameConfig};
pub use flight::{Flight, Frame, GameError, Observation, Outcome, Phase, WallObservation};
pub use pilot::{Pilot, PilotKind};
pub use scene::{GameOver, InputEvent, Scene, SceneManager, Splash, Transition};

pub fn crate_info() -> &'static str {
    "paperplane-game v0.1.0"
}
