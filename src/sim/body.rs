//! Body templates and the body factory
//!
//! A `BodySpec` is a reusable template (all four walls share one per axis, all
//! pieces share one). `create_body` instantiates it in the world and binds the
//! new body to its visual.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::driver::SimulationDriver;
use super::stage::{EntityId, Visual};
use super::units::UnitConverter;
use super::world::BodyHandle;

/// How the solver treats a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    /// Never moves; velocity is ignored
    Static,
    /// Integrated every step
    Dynamic,
}

/// Collision shape in simulation units, centered on the body origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeSpec {
    Circle { radius: f32 },
    Rectangle { half_width: f32, half_height: f32 },
}

impl ShapeSpec {
    /// Rectangle filling an entity of `size` display units
    pub fn rectangle_for(size: Vec2, units: &UnitConverter) -> Self {
        let half = units.vec_to_sim(size) / 2.0;
        ShapeSpec::Rectangle {
            half_width: half.x,
            half_height: half.y,
        }
    }

    /// Circle inscribed in a square entity of `diameter` display units
    pub fn circle_for(diameter: f32, units: &UnitConverter) -> Self {
        ShapeSpec::Circle {
            radius: units.to_sim(diameter) / 2.0,
        }
    }

    /// Axis-aligned half extents
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            ShapeSpec::Circle { radius } => Vec2::splat(radius),
            ShapeSpec::Rectangle {
                half_width,
                half_height,
            } => Vec2::new(half_width, half_height),
        }
    }
}

/// Surface and mass properties of a fixture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub density: f32,
    /// Coulomb friction, [0, 1]
    pub friction: f32,
    /// Bounciness, [0, 1]
    pub restitution: f32,
}

/// Template for one kind of body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub motion: MotionKind,
    pub shape: ShapeSpec,
    pub material: MaterialSpec,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodySpec {
    pub fn new(motion: MotionKind, shape: ShapeSpec, material: MaterialSpec) -> Self {
        Self {
            motion,
            shape,
            material,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Set velocity decay rates (linear, angular)
    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Panics on a malformed template. Specs are built from validated config,
    /// so reaching a bad one here is a bug.
    pub fn validate(&self) {
        let half = self.shape.half_extents();
        assert!(
            half.is_finite() && half.min_element() > 0.0,
            "body shape must have positive size, got {:?}",
            self.shape
        );
        let MaterialSpec {
            density,
            friction,
            restitution,
        } = self.material;
        assert!(density.is_finite() && density > 0.0, "density must be positive, got {density}");
        assert!((0.0..=1.0).contains(&friction), "friction must be within [0, 1], got {friction}");
        assert!(
            (0.0..=1.0).contains(&restitution),
            "restitution must be within [0, 1], got {restitution}"
        );
        assert!(
            self.linear_damping >= 0.0 && self.angular_damping >= 0.0,
            "damping must be non-negative"
        );
    }
}

/// A body paired with the visual that displays it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityBinding {
    pub entity: EntityId,
    pub body: BodyHandle,
}

/// Create a body from `spec` at `position` (simulation units) and bind it to `entity`
///
/// The body origin is the entity's geometric center, so the shape spec must be
/// built from the entity's display size (see `ShapeSpec::rectangle_for`).
pub fn create_body(
    driver: &mut SimulationDriver,
    entity: &Visual,
    spec: &BodySpec,
    position: Vec2,
) -> EntityBinding {
    spec.validate();
    assert!(
        (driver.units().vec_to_display(spec.shape.half_extents() * 2.0) - entity.size())
            .abs()
            .max_element()
            < 1e-3,
        "shape {:?} does not match entity size {:?}",
        spec.shape,
        entity.size()
    );

    let body = driver.world_mut().insert_body(entity.id, spec, position);
    let binding = EntityBinding {
        entity: entity.id,
        body,
    };
    driver.bind(binding);
    log::debug!(
        "Created {:?} body for {:?} at ({:.2}, {:.2})",
        spec.motion,
        entity.id,
        position.x,
        position.y
    );
    binding
}
