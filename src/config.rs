//! Scene configuration
//!
//! Fixed at scene start. Values are passed into each component's constructor,
//! so several independent scenes (e.g. in tests) can coexist.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Physics world properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity in simulation units (m/s^2). Zero for the top-down table.
    pub gravity: Vec2,
    /// Display units per simulation unit (pixels per meter)
    pub scale: f32,
    /// Let bodies at rest drop out of the simulation until disturbed
    pub sleep: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::ZERO,
            scale: DEFAULT_SCALE,
            sleep: true,
        }
    }
}

/// Arena size in display units, normally the host's screen size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
        }
    }
}

impl ArenaSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Geometric center in display units
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0
    }
}

/// Drag-to-launch tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Multiplier from drag length (pixels) to impulse (pixel-scaled N*s)
    pub power: f32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self { power: LAUNCH_POWER }
    }
}

/// Piece (disk) template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceConfig {
    /// Diameter in simulation units
    pub diameter: f32,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for PieceConfig {
    fn default() -> Self {
        Self {
            diameter: PIECE_DIAMETER,
            density: PIECE_DENSITY,
            friction: PIECE_FRICTION,
            restitution: PIECE_RESTITUTION,
            linear_damping: PIECE_LINEAR_DAMPING,
            angular_damping: PIECE_ANGULAR_DAMPING,
        }
    }
}

/// Everything needed to build one scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for piece placement
    pub seed: u64,
    pub arena: ArenaSize,
    pub frames_per_second: f32,
    pub world: WorldConfig,
    pub launch: LaunchConfig,
    pub piece: PieceConfig,
    /// Wall thickness in simulation units
    pub wall_thickness: f32,
    pub piece_count: usize,
    /// Distance (simulation units) kept between spawned pieces and the arena edge
    pub spawn_inset: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            arena: ArenaSize::default(),
            frames_per_second: DEFAULT_FPS,
            world: WorldConfig::default(),
            launch: LaunchConfig::default(),
            piece: PieceConfig::default(),
            wall_thickness: WALL_THICKNESS,
            piece_count: PIECE_COUNT,
            spawn_inset: SPAWN_INSET,
        }
    }
}

impl SceneConfig {
    /// Default config sized to the host display
    pub fn with_arena(width: f32, height: f32) -> Self {
        Self {
            arena: ArenaSize::new(width, height),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value a scene relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.world.scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::InvalidScale(scale));
        }
        let fps = self.frames_per_second;
        if !(fps.is_finite() && fps > 0.0) {
            return Err(ConfigError::InvalidFrameRate(fps));
        }

        positive("wall thickness", self.wall_thickness)?;
        positive("piece diameter", self.piece.diameter)?;
        positive("piece density", self.piece.density)?;
        positive("launch power", self.launch.power)?;
        unit_interval("piece friction", self.piece.friction)?;
        unit_interval("piece restitution", self.piece.restitution)?;
        for damping in [self.piece.linear_damping, self.piece.angular_damping] {
            if !(damping.is_finite() && damping >= 0.0) {
                return Err(ConfigError::InvalidDamping(damping));
            }
        }

        // Pieces need a non-empty spawn window on both axes
        let inset = self.spawn_inset * scale;
        let ArenaSize { width, height } = self.arena;
        let too_small = !(width.is_finite() && height.is_finite())
            || !(self.spawn_inset >= 0.0)
            || width <= 2.0 * inset
            || height <= 2.0 * inset;
        if too_small {
            return Err(ConfigError::ArenaTooSmall {
                width,
                height,
                inset,
            });
        }

        Ok(())
    }

    /// Fixed simulation timestep for one host frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frames_per_second
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn unit_interval(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidCoefficient { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_table() {
        let config = SceneConfig::default();
        assert_eq!(config.world.gravity, Vec2::ZERO);
        assert_eq!(config.world.scale, 50.0);
        assert!(config.world.sleep);
        assert_eq!(config.launch.power, 10.0);
        assert_eq!(config.piece.linear_damping, 0.5);
        assert_eq!(config.piece.angular_damping, 0.5);
        assert_eq!(config.piece_count, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SceneConfig::from_json(r#"{ "seed": 42, "arena": { "width": 800, "height": 600 } }"#)
            .unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.arena, ArenaSize::new(800.0, 600.0));
        assert_eq!(config.piece_count, PIECE_COUNT);
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = SceneConfig::with_arena(1024.0, 768.0);
        config.world.gravity = Vec2::new(0.0, 9.8);
        let json = config.to_json().unwrap();
        assert_eq!(SceneConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_scale() {
        let err = SceneConfig::from_json(r#"{ "world": { "scale": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScale(_)));
    }

    #[test]
    fn test_rejects_tiny_arena() {
        // 1m inset at 50px/m leaves nothing in a 90px wide arena
        let config = SceneConfig::with_arena(90.0, 400.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ArenaTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_restitution() {
        let mut config = SceneConfig::default();
        config.piece.restitution = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCoefficient { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SceneConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_frame_dt() {
        let mut config = SceneConfig::default();
        config.frames_per_second = 60.0;
        assert!((config.frame_dt() - 1.0 / 60.0).abs() < 1e-9);
    }
}
