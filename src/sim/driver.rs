//! Fixed-timestep world advancement
//!
//! Called exactly once per host frame. The timestep is `1 / fps`, never a
//! measured frame time, so a replay of the same inputs gives the same result.

use super::body::EntityBinding;
use super::stage::Stage;
use super::units::UnitConverter;
use super::world::PhysicsWorld;
use crate::config::WorldConfig;

/// Owns the world and every body <-> visual binding
pub struct SimulationDriver {
    config: WorldConfig,
    units: UnitConverter,
    world: PhysicsWorld,
    /// In creation order
    bindings: Vec<EntityBinding>,
    frames_per_second: f32,
    frame_count: u64,
}

impl SimulationDriver {
    pub fn new(config: WorldConfig, frames_per_second: f32) -> Self {
        assert!(
            frames_per_second.is_finite() && frames_per_second > 0.0,
            "frame rate must be positive, got {frames_per_second}"
        );
        Self {
            units: UnitConverter::new(config.scale),
            world: PhysicsWorld::new(&config),
            config,
            bindings: Vec::new(),
            frames_per_second,
            frame_count: 0,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn units(&self) -> &UnitConverter {
        &self.units
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn bindings(&self) -> &[EntityBinding] {
        &self.bindings
    }

    /// Register a binding so its visual follows the body
    pub fn bind(&mut self, binding: EntityBinding) {
        self.bindings.push(binding);
    }

    /// Timestep for one frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frames_per_second
    }

    /// Steps taken so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// One host frame
    pub fn advance_frame(&mut self, stage: &mut Stage) {
        self.advance(self.frame_dt(), stage);
    }

    /// Step the world by `dt` seconds, then push every body transform to its visual
    pub fn advance(&mut self, dt: f32, stage: &mut Stage) {
        assert!(dt.is_finite() && dt > 0.0, "timestep must be positive, got {dt}");
        self.world.step(dt);
        self.frame_count += 1;
        self.sync(stage);
    }

    /// Copy body transforms onto visuals (position scaled to display units, angle as is)
    pub fn sync(&self, stage: &mut Stage) {
        for binding in &self.bindings {
            let Some(visual) = stage.visual_mut(binding.entity) else {
                log::warn!("No visual for bound entity {:?}", binding.entity);
                continue;
            };
            visual.position = self.units.vec_to_display(self.world.position(binding.body));
            visual.angle = self.world.angle(binding.body);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::body::{BodySpec, MaterialSpec, MotionKind, ShapeSpec, create_body};
    use crate::sim::stage::VisualKind;

    fn spawn_disk(driver: &mut SimulationDriver, stage: &mut Stage, at: Vec2) -> EntityBinding {
        let visual = stage
            .spawn_visual(VisualKind::Piece, Vec2::splat(50.0), Vec2::ZERO)
            .clone();
        let spec = BodySpec::new(
            MotionKind::Dynamic,
            ShapeSpec::circle_for(50.0, driver.units()),
            MaterialSpec {
                density: 5.0,
                friction: 1.0,
                restitution: 0.999,
            },
        );
        create_body(driver, &visual, &spec, at)
    }

    #[test]
    fn test_frame_dt_is_fixed() {
        let driver = SimulationDriver::new(WorldConfig::default(), 60.0);
        assert!((driver.frame_dt() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_syncs_visuals() {
        let mut driver = SimulationDriver::new(WorldConfig::default(), 60.0);
        let mut stage = Stage::new();
        let binding = spawn_disk(&mut driver, &mut stage, Vec2::new(2.0, 3.0));
        driver.world_mut().set_velocity(binding.body, Vec2::new(1.0, 0.0), 0.5);

        driver.advance_frame(&mut stage);

        let body_pos = driver.world().position(binding.body);
        let visual = stage.visual(binding.entity).unwrap();
        assert!(body_pos.x > 2.0);
        assert_eq!(visual.position, body_pos * 50.0);
        assert_eq!(visual.angle, driver.world().angle(binding.body));
        assert_eq!(driver.frame_count(), 1);
    }

    #[test]
    fn test_undamped_body_keeps_speed() {
        let mut driver = SimulationDriver::new(WorldConfig::default(), 60.0);
        let mut stage = Stage::new();
        let binding = spawn_disk(&mut driver, &mut stage, Vec2::new(2.0, 3.0));
        driver
            .world_mut()
            .set_velocity(binding.body, Vec2::new(4.0, 0.0), 0.0);
        for _ in 0..30 {
            driver.advance_frame(&mut stage);
        }
        let vx = driver.world().linear_velocity(binding.body).x;
        assert!((vx - 4.0).abs() < 1e-3);
    }

    #[test]
    #[should_panic(expected = "timestep")]
    fn test_zero_dt_panics() {
        let mut driver = SimulationDriver::new(WorldConfig::default(), 60.0);
        driver.advance(0.0, &mut Stage::new());
    }
}
