use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for a flight. Every field has a default, so a config file only
/// needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_size: Vec2,
    /// Camera anchor as a fraction of the window size.
    pub camera_anchor: Vec2,
    pub plane_size: Vec2,
    pub crate_size: Vec2,
    pub background_size: Vec2,
    /// Initial forward speed, pixels per frame.
    pub plane_speed: f32,
    /// Distance flown straight before the player takes control.
    pub cruise_distance: f32,
    /// Largest pitch, in degrees, before the plane recovers on its own.
    pub max_angle: f32,
    /// Degrees per frame while pitching toward the input.
    pub pitch_rate: f32,
    /// Degrees per frame while recovering from a pitch past `max_angle`.
    pub recover_rate: f32,
    /// Forward speed gained for every wall passed.
    pub speed_boost: f32,
    /// Wall spacing bounds as a per-axis fraction of the window: the near
    /// bound scales the width and the far bound scales the height.
    pub wall_spacing: Vec2,
    pub parallax_factor: Vec2,
    /// Frames the game-over screen ignores presses for.
    pub game_over_lockout_frames: u32,
    /// RNG seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_size: Vec2::new(1280.0, 720.0),
            camera_anchor: Vec2::new(0.05, 0.5),
            plane_size: Vec2::new(64.0, 16.0),
            crate_size: Vec2::new(72.0, 104.0),
            background_size: Vec2::new(1280.0, 720.0),
            plane_speed: 10.0,
            cruise_distance: 300.0,
            max_angle: 75.0,
            pitch_rate: 2.5,
            recover_rate: 0.5,
            speed_boost: 0.1,
            wall_spacing: Vec2::new(0.5, 1.0),
            parallax_factor: Vec2::new(0.2, 0.0),
            game_over_lockout_frames: 60,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, size) in [
            ("window_size", self.window_size),
            ("plane_size", self.plane_size),
            ("crate_size", self.crate_size),
            ("background_size", self.background_size),
        ] {
            if !(size.x > 0.0 && size.y > 0.0) {
                return Err(invalid(field, format!("must be positive, got {size}")));
            }
        }
        for (field, rate) in [
            ("plane_speed", self.plane_speed),
            ("pitch_rate", self.pitch_rate),
            ("recover_rate", self.recover_rate),
        ] {
            if !(rate > 0.0) {
                return Err(invalid(field, format!("must be positive, got {rate}")));
            }
        }
        if !(0.0..=180.0).contains(&self.max_angle) {
            return Err(invalid(
                "max_angle",
                format!("must lie in [0, 180], got {}", self.max_angle),
            ));
        }
        if !(self.cruise_distance >= 0.0) {
            return Err(invalid("cruise_distance", "must not be negative".into()));
        }
        if !(self.speed_boost >= 0.0) {
            return Err(invalid("speed_boost", "must not be negative".into()));
        }
        let (near, far) = self.wall_spacing_px();
        if !(near > 0 && near <= far) {
            return Err(invalid(
                "wall_spacing",
                format!("range {near}..={far} px must be positive and ordered"),
            ));
        }
        Ok(())
    }

    /// Camera anchor in pixels.
    pub fn camera_anchor_px(&self) -> Vec2 {
        self.window_size * self.camera_anchor
    }

    /// Inclusive bounds, in pixels, for the distance to the next wall.
    pub fn wall_spacing_px(&self) -> (i64, i64) {
        let bounds = (self.window_size * self.wall_spacing).round();
        (bounds.x as i64, bounds.y as i64)
    }

    /// The highest the plane may fly. Screen frame: y grows downward, so the
    /// ceiling is negative.
    pub fn ceiling(&self) -> f32 {
        (-self.window_size.y + self.plane_size.y) / 2.0
    }

    /// Flying below this ends the game.
    pub fn floor(&self) -> f32 {
        (self.window_size.y - self.plane_size.y) / 2.0
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
