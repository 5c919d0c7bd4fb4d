//! Error types
//!
//! Only configuration loading and illegal drag transitions are recoverable.
//! Malformed body specs and bad timesteps are programmer errors and panic.

use thiserror::Error;

use crate::sim::EntityId;

/// Errors raised while loading or validating a `SceneConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Scale must be a positive, finite number of pixels per meter.
    #[error("Invalid scale: {0} (must be > 0)")]
    InvalidScale(f32),

    /// Frame rate must be positive and finite.
    #[error("Invalid frame rate: {0} (must be > 0)")]
    InvalidFrameRate(f32),

    /// Arena has no room for pieces once the spawn inset is applied.
    #[error("Arena {width}x{height} is too small for a spawn inset of {inset}")]
    ArenaTooSmall {
        /// Arena width in pixels.
        width: f32,
        /// Arena height in pixels.
        height: f32,
        /// Spawn inset in pixels.
        inset: f32,
    },

    /// Damping must be non-negative and finite.
    #[error("Invalid damping: {0} (must be >= 0)")]
    InvalidDamping(f32),

    /// Coefficient outside of [0, 1].
    #[error("Invalid {name}: {value} (must be within [0, 1])")]
    InvalidCoefficient {
        /// Which coefficient.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Any other non-positive size or density.
    #[error("Invalid {name}: {value} (must be > 0)")]
    NonPositive {
        /// Which field.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// JSON could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A pointer event that the drag state machine rejected.
///
/// Rejection leaves every piece, body and indicator untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DragError {
    /// The entity is not a registered piece.
    #[error("Entity {0:?} is not a draggable piece")]
    UnknownPiece(EntityId),

    /// Move or release arrived without a preceding press.
    #[error("Piece {0:?} is not being dragged")]
    NotDragging(EntityId),

    /// Press on a piece whose visual is not accepting pointer input.
    #[error("Piece {0:?} is not touchable")]
    NotTouchable(EntityId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidScale(-1.0);
        assert_eq!(format!("{err}"), "Invalid scale: -1 (must be > 0)");

        let err = DragError::NotDragging(EntityId(3));
        assert!(format!("{err}").contains("not being dragged"));

        let err = DragError::NotTouchable(EntityId(4));
        assert!(format!("{err}").contains("not touchable"));
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
