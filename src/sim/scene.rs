//! One play session
//!
//! `FlickScene` is the single owner of the world: the host's event pump calls the
//! `on_drag_*` methods between frames and `update` once per frame, all on one
//! thread, so every body mutation is serialized through here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{BodySpec, EntityBinding, MaterialSpec, MotionKind, ShapeSpec, create_body};
use super::boundary::{Boundary, build_boundary};
use super::drag::{DragController, DragState, Launch};
use super::driver::SimulationDriver;
use super::stage::{EntityId, Stage, VisualKind};
use crate::config::{ArenaSize, PieceConfig, SceneConfig};
use crate::error::{ConfigError, DragError};

/// Piece template for a given config
pub fn piece_spec(piece: &PieceConfig) -> BodySpec {
    BodySpec::new(
        MotionKind::Dynamic,
        ShapeSpec::Circle {
            radius: piece.diameter / 2.0,
        },
        MaterialSpec {
            density: piece.density,
            friction: piece.friction,
            restitution: piece.restitution,
        },
    )
    .with_damping(piece.linear_damping, piece.angular_damping)
}

/// Walls, pieces and input for one arena
pub struct FlickScene {
    config: SceneConfig,
    driver: SimulationDriver,
    stage: Stage,
    drag: DragController,
    boundary: Boundary,
    pieces: Vec<EntityBinding>,
    piece_spec: BodySpec,
    rng: Pcg32,
}

impl FlickScene {
    /// Build the walls and scatter `piece_count` pieces
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        let mut scene = Self::empty(config)?;
        for _ in 0..scene.config.piece_count {
            let position = scene.random_position();
            scene.spawn_piece(position);
        }
        log::info!(
            "Scene ready: {}x{} arena, {} pieces, seed {}",
            scene.config.arena.width,
            scene.config.arena.height,
            scene.pieces.len(),
            scene.config.seed
        );
        Ok(scene)
    }

    /// Walls only; pieces are added with `spawn_piece`
    pub fn empty(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut driver = SimulationDriver::new(config.world, config.frames_per_second);
        let mut stage = Stage::new();
        let boundary = build_boundary(&mut driver, &mut stage, config.arena, config.wall_thickness);
        Ok(Self {
            drag: DragController::new(config.launch),
            piece_spec: piece_spec(&config.piece),
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            driver,
            stage,
            boundary,
            pieces: Vec::new(),
        })
    }

    /// Add a draggable piece centered at `position` (display units)
    pub fn spawn_piece(&mut self, position: Vec2) -> EntityId {
        let units = *self.driver.units();
        let size = Vec2::splat(units.to_display(self.config.piece.diameter));
        let visual = self.stage.spawn_visual(VisualKind::Piece, size, position);
        let binding = create_body(
            &mut self.driver,
            visual,
            &self.piece_spec,
            units.vec_to_sim(position),
        );
        self.drag.register(binding.entity, binding.body);
        self.pieces.push(binding);
        binding.entity
    }

    /// Uniform position at least `spawn_inset` from every edge (display units)
    fn random_position(&mut self) -> Vec2 {
        let inset = self.driver.units().to_display(self.config.spawn_inset);
        let ArenaSize { width, height } = self.config.arena;
        let x = self.rng.random_range(inset..=width - inset);
        let y = self.rng.random_range(inset..=height - inset);
        Vec2::new(x, y)
    }

    /// Advance one host frame
    pub fn update(&mut self) {
        self.driver.advance_frame(&mut self.stage);
    }

    pub fn on_drag_start(&mut self, piece: EntityId, local_point: Vec2) -> Result<Vec2, DragError> {
        self.drag
            .on_drag_start(piece, local_point, &mut self.driver, &mut self.stage)
    }

    pub fn on_drag_move(&mut self, piece: EntityId, point: Vec2) -> Result<(), DragError> {
        self.drag.on_drag_move(piece, point, &mut self.stage)
    }

    pub fn on_drag_end(&mut self, piece: EntityId, point: Vec2) -> Result<Launch, DragError> {
        self.drag
            .on_drag_end(piece, point, &mut self.driver, &mut self.stage)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn driver(&self) -> &SimulationDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut SimulationDriver {
        &mut self.driver
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Pieces in spawn order
    pub fn pieces(&self) -> &[EntityBinding] {
        &self.pieces
    }

    pub fn piece(&self, id: EntityId) -> Option<&EntityBinding> {
        self.pieces.iter().find(|p| p.entity == id)
    }

    pub fn drag_state(&self, piece: EntityId) -> Option<DragState> {
        self.drag.state(piece)
    }

    /// Piece position in simulation units
    pub fn piece_position(&self, piece: EntityId) -> Option<Vec2> {
        self.piece(piece).map(|p| self.driver.world().position(p.body))
    }
}
