use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{ConfigError, GameConfig};
use crate::flight::{Flight, GameError, Outcome};

/// Abstract input, already translated from whatever device produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    PrimaryDown,
    PrimaryUp,
    Quit,
}

/// What the manager should do after a scene's step.
#[derive(Debug)]
pub enum Transition {
    Stay,
    Switch(Box<dyn Scene>),
    Exit,
}

/// A self-contained stage of the game.
pub trait Scene: fmt::Debug {
    fn name(&self) -> &'static str;

    fn process_events(&mut self, events: &[InputEvent]);

    fn step(&mut self) -> Result<(), GameError>;

    /// Decide the next scene. Called once per tick, after [`Scene::step`].
    fn transition(&mut self) -> Transition;

    /// Score to show for this scene, if it has one.
    fn score(&self) -> Option<u32> {
        None
    }
}

/// Owns the running scene and moves between scenes.
#[derive(Debug)]
pub struct SceneManager {
    current: Option<Box<dyn Scene>>,
    ticks: u64,
}

impl SceneManager {
    pub fn new(first: Box<dyn Scene>) -> Self {
        tracing::info!(scene = first.name(), "scene started");
        Self {
            current: Some(first),
            ticks: 0,
        }
    }

    /// Start at the splash screen.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(Box::new(Splash::new(config)?)))
    }

    pub fn current(&self) -> Option<&dyn Scene> {
        self.current.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feed one frame of events to the current scene, step it, and apply its
    /// transition. Returns whether a scene is still running.
    pub fn tick(&mut self, events: &[InputEvent]) -> Result<bool, GameError> {
        let Some(scene) = self.current.as_mut() else {
            return Ok(false);
        };
        self.ticks += 1;
        scene.process_events(events);
        scene.step()?;
        match scene.transition() {
            Transition::Stay => {}
            Transition::Switch(next) => {
                tracing::info!(from = scene.name(), to = next.name(), "scene switched");
                self.current = Some(next);
            }
            Transition::Exit => {
                tracing::info!(from = scene.name(), "exit requested");
                self.current = None;
            }
        }
        Ok(self.current.is_some())
    }
}

/// Title screen; a press starts a flight.
#[derive(Debug)]
pub struct Splash {
    config: GameConfig,
    start: bool,
    quit: bool,
}

impl Splash {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            start: false,
            quit: false,
        })
    }
}

/// Switch to a fresh flight, or exit when the config cannot start one.
fn start_flight(config: &GameConfig) -> Transition {
    match Flight::new(config.clone()) {
        Ok(flight) => Transition::Switch(Box::new(flight)),
        Err(err) => {
            tracing::error!(%err, "cannot start flight");
            Transition::Exit
        }
    }
}

impl Scene for Splash {
    fn name(&self) -> &'static str {
        "splash"
    }

    fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match event {
                InputEvent::Quit => self.quit = true,
                InputEvent::PrimaryDown => self.start = true,
                InputEvent::PrimaryUp => {}
            }
        }
    }

    fn step(&mut self) -> Result<(), GameError> {
        Ok(())
    }

    fn transition(&mut self) -> Transition {
        if self.quit {
            Transition::Exit
        } else if self.start {
            start_flight(&self.config)
        } else {
            Transition::Stay
        }
    }
}

impl Scene for Flight {
    fn name(&self) -> &'static str {
        "flight"
    }

    fn process_events(&mut self, events: &[InputEvent]) {
        Flight::process_events(self, events);
    }

    fn step(&mut self) -> Result<(), GameError> {
        Flight::step(self)
    }

    fn transition(&mut self) -> Transition {
        match self.outcome() {
            None => Transition::Stay,
            Some(Outcome::Quit) => Transition::Exit,
            Some(Outcome::Crashed { score }) => {
                Transition::Switch(Box::new(GameOver::new(self.config().clone(), score)))
            }
        }
    }

    fn score(&self) -> Option<u32> {
        Some(Flight::score(self))
    }
}

/// Final score screen. Presses are ignored for a short lockout so a held
/// input does not skip it.
#[derive(Debug)]
pub struct GameOver {
    config: GameConfig,
    score: u32,
    frames: u32,
    replay: bool,
    quit: bool,
}

impl GameOver {
    pub fn new(config: GameConfig, score: u32) -> Self {
        Self {
            config,
            score,
            frames: 0,
            replay: false,
            quit: false,
        }
    }

    fn locked(&self) -> bool {
        self.frames <= self.config.game_over_lockout_frames
    }
}

impl Scene for GameOver {
    fn name(&self) -> &'static str {
        "game-over"
    }

    fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match event {
                InputEvent::Quit => self.quit = true,
                InputEvent::PrimaryDown if !self.locked() => self.replay = true,
                _ => {}
            }
        }
    }

    fn step(&mut self) -> Result<(), GameError> {
        self.frames = self.frames.saturating_add(1);
        Ok(())
    }

    fn transition(&mut self) -> Transition {
        if self.quit {
            Transition::Exit
        } else if self.replay {
            start_flight(&self.config)
        } else {
            Transition::Stay
        }
    }

    fn score(&self) -> Option<u32> {
        Some(self.score)
    }
}
