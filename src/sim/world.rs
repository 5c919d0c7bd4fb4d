//! Rigid-body world
//!
//! Wraps the rapier boilerplate behind the handful of commands the game issues:
//! insert a body, read its transform and velocities, stop it, push it, step.
//! Everything here is in simulation units; glam <-> nalgebra conversion stays
//! private to this file.

use glam::Vec2;
use rapier2d::prelude::*;

use super::body::{BodySpec, MotionKind, ShapeSpec};
use super::stage::EntityId;
use crate::config::WorldConfig;

fn to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn from_na(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Opaque reference to a body owned by a `PhysicsWorld`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(RigidBodyHandle);

/// The solver state for one scene
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    sleep: bool,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            gravity: to_na(config.gravity),
            sleep: config.sleep,
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Insert a body with one collider built from `spec`
    ///
    /// The owning entity id is kept in the body's `user_data`.
    pub fn insert_body(&mut self, entity: EntityId, spec: &BodySpec, position: Vec2) -> BodyHandle {
        let builder = match spec.motion {
            MotionKind::Static => RigidBodyBuilder::fixed(),
            MotionKind::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let rb = builder
            .translation(to_na(position))
            .linear_damping(spec.linear_damping)
            .angular_damping(spec.angular_damping)
            .can_sleep(self.sleep)
            .user_data(entity.0 as u128)
            .build();
        let handle = self.bodies.insert(rb);

        let collider = match spec.shape {
            ShapeSpec::Circle { radius } => ColliderBuilder::ball(radius),
            ShapeSpec::Rectangle {
                half_width,
                half_height,
            } => ColliderBuilder::cuboid(half_width, half_height),
        }
        .density(spec.material.density)
        .friction(spec.material.friction)
        .restitution(spec.material.restitution)
        .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        // Mass must be current before the first impulse, which may precede the first step
        self.bodies[handle].recompute_mass_properties_from_colliders(&self.colliders);

        BodyHandle(handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// World position of the body origin
    pub fn position(&self, body: BodyHandle) -> Vec2 {
        from_na(self.bodies[body.0].translation())
    }

    /// Orientation in radians
    pub fn angle(&self, body: BodyHandle) -> f32 {
        self.bodies[body.0].rotation().angle()
    }

    pub fn linear_velocity(&self, body: BodyHandle) -> Vec2 {
        from_na(self.bodies[body.0].linvel())
    }

    pub fn angular_velocity(&self, body: BodyHandle) -> f32 {
        self.bodies[body.0].angvel()
    }

    /// (linear, angular) damping
    pub fn damping(&self, body: BodyHandle) -> (f32, f32) {
        let rb = &self.bodies[body.0];
        (rb.linear_damping(), rb.angular_damping())
    }

    pub fn is_dynamic(&self, body: BodyHandle) -> bool {
        self.bodies[body.0].is_dynamic()
    }

    pub fn is_sleeping(&self, body: BodyHandle) -> bool {
        self.bodies[body.0].is_sleeping()
    }

    pub fn mass(&self, body: BodyHandle) -> f32 {
        self.bodies[body.0].mass()
    }

    /// Entity this body was created for
    pub fn entity_of(&self, body: BodyHandle) -> EntityId {
        EntityId(self.bodies[body.0].user_data as u32)
    }

    /// Teleport a body (scene setup only; does not touch velocity)
    pub fn set_transform(&mut self, body: BodyHandle, position: Vec2, angle: f32) {
        self.bodies[body.0].set_position(Isometry::new(to_na(position), angle), true);
    }

    pub fn set_velocity(&mut self, body: BodyHandle, linear: Vec2, angular: f32) {
        let rb = &mut self.bodies[body.0];
        rb.set_linvel(to_na(linear), true);
        rb.set_angvel(angular, true);
    }

    /// Kill all linear and angular motion
    pub fn stop(&mut self, body: BodyHandle) {
        self.set_velocity(body, Vec2::ZERO, 0.0);
    }

    /// Instantaneous impulse at a world point; off-center points also spin the body
    pub fn apply_impulse_at(&mut self, body: BodyHandle, impulse: Vec2, at: Vec2) {
        self.bodies[body.0].apply_impulse_at_point(to_na(impulse), point![at.x, at.y], true);
    }

    /// Advance the solver by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::MaterialSpec;

    fn disk() -> BodySpec {
        BodySpec::new(
            MotionKind::Dynamic,
            ShapeSpec::Circle { radius: 0.5 },
            MaterialSpec {
                density: 5.0,
                friction: 1.0,
                restitution: 0.999,
            },
        )
    }

    #[test]
    fn test_mass_available_before_first_step() {
        let mut world = PhysicsWorld::new(&WorldConfig::default());
        let body = world.insert_body(EntityId(1), &disk(), Vec2::new(5.0, 5.0));
        // density * pi * r^2
        let expected = 5.0 * std::f32::consts::PI * 0.25;
        assert!((world.mass(body) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_centered_impulse_moves_without_spin() {
        let mut world = PhysicsWorld::new(&WorldConfig::default());
        let body = world.insert_body(EntityId(1), &disk(), Vec2::new(5.0, 5.0));
        world.apply_impulse_at(body, Vec2::new(3.0, 0.0), Vec2::new(5.0, 5.0));
        assert!(world.linear_velocity(body).x > 0.0);
        assert!(world.angular_velocity(body).abs() < 1e-6);
    }

    #[test]
    fn test_off_center_impulse_spins() {
        let mut world = PhysicsWorld::new(&WorldConfig::default());
        let body = world.insert_body(EntityId(1), &disk(), Vec2::new(5.0, 5.0));
        world.apply_impulse_at(body, Vec2::new(3.0, 0.0), Vec2::new(5.0, 5.4));
        assert!(world.angular_velocity(body).abs() > 1e-3);
    }

    #[test]
    fn test_stop_zeroes_velocity() {
        let mut world = PhysicsWorld::new(&WorldConfig::default());
        let body = world.insert_body(EntityId(1), &disk(), Vec2::ZERO);
        world.set_velocity(body, Vec2::new(4.0, -2.0), 1.5);
        world.stop(body);
        assert_eq!(world.linear_velocity(body), Vec2::ZERO);
        assert_eq!(world.angular_velocity(body), 0.0);
    }

    #[test]
    fn test_gravity_pulls_dynamic_bodies() {
        let config = WorldConfig {
            gravity: Vec2::new(0.0, 10.0),
            ..WorldConfig::default()
        };
        let mut world = PhysicsWorld::new(&config);
        let body = world.insert_body(EntityId(1), &disk(), Vec2::ZERO);
        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }
        assert!(world.position(body).y > 0.0);
    }
}
