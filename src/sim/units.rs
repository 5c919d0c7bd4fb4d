//! Display <-> simulation unit conversion
//!
//! The solver works in meters, the host draws in pixels. Every quantity that
//! crosses between the two passes through exactly one of these calls.

use glam::Vec2;

/// Pixels-per-meter mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    scale: f32,
}

impl UnitConverter {
    pub fn new(scale: f32) -> Self {
        assert!(
            scale.is_finite() && scale > 0.0,
            "unit scale must be positive and finite, got {scale}"
        );
        Self { scale }
    }

    /// Display units per simulation unit
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Pixels -> meters
    #[inline]
    pub fn to_sim(&self, pixels: f32) -> f32 {
        pixels / self.scale
    }

    /// Meters -> pixels
    #[inline]
    pub fn to_display(&self, meters: f32) -> f32 {
        meters * self.scale
    }

    #[inline]
    pub fn vec_to_sim(&self, pixels: Vec2) -> Vec2 {
        pixels / self.scale
    }

    #[inline]
    pub fn vec_to_display(&self, meters: Vec2) -> Vec2 {
        meters * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_scale() {
        let units = UnitConverter::new(50.0);
        assert_eq!(units.to_sim(50.0), 1.0);
        assert_eq!(units.to_display(0.5), 25.0);
        // 0.3 has no exact binary form
        assert!((units.to_display(0.3) - 15.0).abs() < 1e-5);
        assert_eq!(units.vec_to_sim(Vec2::new(100.0, 25.0)), Vec2::new(2.0, 0.5));
    }

    #[test]
    #[should_panic(expected = "unit scale")]
    fn test_zero_scale_panics() {
        UnitConverter::new(0.0);
    }

    proptest! {
        #[test]
        fn display_round_trip(x in -1.0e4f32..1.0e4, scale in 1.0f32..200.0) {
            let units = UnitConverter::new(scale);
            let back = units.to_display(units.to_sim(x));
            prop_assert!((back - x).abs() <= 1e-6 * x.abs().max(1.0));
        }

        #[test]
        fn vec_round_trip(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
            let units = UnitConverter::new(50.0);
            let v = Vec2::new(x, y);
            let back = units.vec_to_display(units.vec_to_sim(v));
            prop_assert!((back - v).abs().max_element() <= 1e-6 * v.abs().max_element().max(1.0));
        }
    }
}
