//! Ohajiki - flick the disks across a walled table
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, boundary, stepping, drag-to-launch input)
//! - `config`: Scene configuration with JSON load/save
//! - `error`: Recoverable error types
//!
//! Rendering, asset loading and pointer-event delivery belong to the host. The host
//! reads `sim::Stage` after each frame and forwards pointer events to `sim::FlickScene`.

pub mod config;
pub mod error;
pub mod sim;

pub use config::{ArenaSize, LaunchConfig, PieceConfig, SceneConfig, WorldConfig};
pub use error::{ConfigError, DragError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Display units (pixels) per simulation unit (meter)
    pub const DEFAULT_SCALE: f32 = 50.0;
    /// Host frame rate; the world advances by exactly `1 / fps` per frame
    pub const DEFAULT_FPS: f32 = 30.0;

    /// Default arena, used when the host does not report its display size
    pub const DEFAULT_ARENA_WIDTH: f32 = 640.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 360.0;

    /// Impulse multiplier applied to the (negated) drag vector
    pub const LAUNCH_POWER: f32 = 10.0;

    /// Piece defaults - 1m disks, heavy and very bouncy
    pub const PIECE_COUNT: usize = 7;
    pub const PIECE_DIAMETER: f32 = 1.0; // meters
    pub const PIECE_DENSITY: f32 = 5.0;
    pub const PIECE_FRICTION: f32 = 1.0;
    pub const PIECE_RESTITUTION: f32 = 0.999;
    /// Top-down table has no floor drag, so pieces carry their own
    pub const PIECE_LINEAR_DAMPING: f32 = 0.5;
    pub const PIECE_ANGULAR_DAMPING: f32 = 0.5;
    /// Pieces spawn at least this far (meters) from the arena edges
    pub const SPAWN_INSET: f32 = 1.0;

    /// Wall defaults
    pub const WALL_THICKNESS: f32 = 0.3; // meters
    pub const WALL_DENSITY: f32 = 1.0;
    pub const WALL_FRICTION: f32 = 0.3;
    pub const WALL_RESTITUTION: f32 = 0.7;

    /// Side length (pixels) of the arrow sprite the indicator scale is relative to
    pub const ARROW_SPRITE_SIZE: f32 = 100.0;
}

/// Rotate a vector by `angle` radians (counter-clockwise in a y-up frame)
///
/// Applies `[cos, -sin; sin, cos]`, so an offset expressed in a body's unrotated
/// local frame comes out in world orientation.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Direction of a vector in radians, `atan2(y, x)`
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
