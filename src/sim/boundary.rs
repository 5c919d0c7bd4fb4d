//! Arena walls
//!
//! Four static rectangles flush with the arena edges. Bodies are placed by
//! their center, so each wall goes to `edge origin + half extent`.

use glam::Vec2;

use super::body::{BodySpec, EntityBinding, MaterialSpec, MotionKind, ShapeSpec, create_body};
use super::driver::SimulationDriver;
use super::stage::{Stage, VisualKind};
use crate::config::ArenaSize;
use crate::consts::{WALL_DENSITY, WALL_FRICTION, WALL_RESTITUTION};

/// The four walls of an arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub left: EntityBinding,
    pub right: EntityBinding,
    pub floor: EntityBinding,
    pub ceiling: EntityBinding,
}

impl Boundary {
    pub fn walls(&self) -> [EntityBinding; 4] {
        [self.left, self.right, self.floor, self.ceiling]
    }
}

/// Wall material
pub fn wall_material() -> MaterialSpec {
    MaterialSpec {
        density: WALL_DENSITY,
        friction: WALL_FRICTION,
        restitution: WALL_RESTITUTION,
    }
}

/// Build the walls of a `arena` (display units) with walls `thickness` simulation units thick
pub fn build_boundary(
    driver: &mut SimulationDriver,
    stage: &mut Stage,
    arena: ArenaSize,
    thickness: f32,
) -> Boundary {
    let t = driver.units().to_display(thickness);
    let side = Vec2::new(t, arena.height);
    let flat = Vec2::new(arena.width, t);

    let left = place_wall(driver, stage, side, Vec2::ZERO);
    let right = place_wall(driver, stage, side, Vec2::new(arena.width - t, 0.0));
    let floor = place_wall(driver, stage, flat, Vec2::new(0.0, arena.height - t));
    let ceiling = place_wall(driver, stage, flat, Vec2::ZERO);

    log::debug!(
        "Built boundary for {}x{} arena ({}px walls)",
        arena.width,
        arena.height,
        t
    );
    Boundary {
        left,
        right,
        floor,
        ceiling,
    }
}

/// One wall of display `size` whose upper-left corner sits at `origin`
fn place_wall(
    driver: &mut SimulationDriver,
    stage: &mut Stage,
    size: Vec2,
    origin: Vec2,
) -> EntityBinding {
    let units = *driver.units();
    let center = origin + size / 2.0;
    let spec = BodySpec::new(
        MotionKind::Static,
        ShapeSpec::rectangle_for(size, &units),
        wall_material(),
    );
    let visual = stage.spawn_visual(VisualKind::Wall, size, center);
    create_body(driver, visual, &spec, units.vec_to_sim(center))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorldConfig;

    const W: f32 = 640.0;
    const H: f32 = 360.0;

    fn built() -> (SimulationDriver, Stage, Boundary) {
        let mut driver = SimulationDriver::new(WorldConfig::default(), 30.0);
        let mut stage = Stage::new();
        let boundary = build_boundary(&mut driver, &mut stage, ArenaSize::new(W, H), 0.3);
        (driver, stage, boundary)
    }

    #[test]
    fn test_wall_centers() {
        let (driver, _, boundary) = built();
        let world = driver.world();
        let w = W / 50.0;
        let h = H / 50.0;
        let t = 0.3;

        let left = world.position(boundary.left.body);
        let right = world.position(boundary.right.body);
        let floor = world.position(boundary.floor.body);
        let ceiling = world.position(boundary.ceiling.body);

        assert!((left.x - t / 2.0).abs() < 1e-5);
        assert!((right.x - (w - t / 2.0)).abs() < 1e-5);
        assert!((ceiling.y - t / 2.0).abs() < 1e-5);
        assert!((floor.y - (h - t / 2.0)).abs() < 1e-5);

        // Side walls span the full height, floor and ceiling the full width
        assert!((left.y - h / 2.0).abs() < 1e-5);
        assert!((floor.x - w / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_walls_are_static_and_bound() {
        let (driver, stage, boundary) = built();
        assert_eq!(driver.bindings().len(), 4);
        for wall in boundary.walls() {
            assert!(!driver.world().is_dynamic(wall.body));
            let visual = stage.visual(wall.entity).unwrap();
            assert_eq!(visual.kind, VisualKind::Wall);
        }
        let near = |a: Vec2, b: Vec2| (a - b).abs().max_element() < 1e-3;
        let left = stage.visual(boundary.left.entity).unwrap();
        assert!(near(left.size(), Vec2::new(15.0, H)));
        assert!(near(left.top_left(), Vec2::ZERO));
        let floor = stage.visual(boundary.floor.entity).unwrap();
        assert!(near(floor.top_left(), Vec2::new(0.0, H - 15.0)));
    }

    #[test]
    fn test_walls_do_not_move() {
        let (mut driver, mut stage, boundary) = built();
        let before = driver.world().position(boundary.right.body);
        for _ in 0..10 {
            driver.advance_frame(&mut stage);
        }
        assert_eq!(driver.world().position(boundary.right.body), before);
    }
}
