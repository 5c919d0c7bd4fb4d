//! Drag-to-launch input
//!
//! Each piece runs a small state machine: press grabs it (stopping any motion
//! and fixing an anchor on the disk), moves aim an arrow, release flicks it like
//! a slingshot in the opposite direction of the drag.
//!
//! Move or release without a press is rejected and changes nothing.

use std::collections::BTreeMap;

use glam::Vec2;

use super::driver::SimulationDriver;
use super::stage::{EntityId, IndicatorId, Stage};
use super::world::BodyHandle;
use crate::config::LaunchConfig;
use crate::error::DragError;
use crate::{heading, rotate};

/// Per-piece gesture state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        /// World-space impulse point (simulation units), fixed until release
        anchor: Vec2,
        /// Where the press landed in display space
        origin: Vec2,
        /// Arrow owned by this gesture
        indicator: IndicatorId,
    },
}

/// Impulse issued by a release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    /// Simulation units (N*s)
    pub impulse: Vec2,
    /// Application point, simulation units
    pub anchor: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct PieceSlot {
    body: BodyHandle,
    state: DragState,
}

/// Drag state of every piece, keyed by piece entity
#[derive(Debug, Clone)]
pub struct DragController {
    config: LaunchConfig,
    pieces: BTreeMap<EntityId, PieceSlot>,
}

impl DragController {
    pub fn new(config: LaunchConfig) -> Self {
        Self {
            config,
            pieces: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Make a piece draggable
    pub fn register(&mut self, piece: EntityId, body: BodyHandle) {
        self.pieces.insert(
            piece,
            PieceSlot {
                body,
                state: DragState::Idle,
            },
        );
    }

    pub fn state(&self, piece: EntityId) -> Option<DragState> {
        self.pieces.get(&piece).map(|slot| slot.state)
    }

    pub fn is_dragging(&self, piece: EntityId) -> bool {
        matches!(self.state(piece), Some(DragState::Dragging { .. }))
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Pointer pressed on `piece` at `local_point` (display units, relative to
    /// the piece's unrotated bounds). Returns the anchor.
    ///
    /// A press while already dragging restarts the gesture.
    pub fn on_drag_start(
        &mut self,
        piece: EntityId,
        local_point: Vec2,
        driver: &mut SimulationDriver,
        stage: &mut Stage,
    ) -> Result<Vec2, DragError> {
        let slot = self.pieces.get_mut(&piece).ok_or(DragError::UnknownPiece(piece))?;
        let Some(visual) = stage.visual(piece) else {
            log::warn!("Drag start on {:?} which has no visual", piece);
            return Err(DragError::UnknownPiece(piece));
        };
        if !visual.touchable {
            log::debug!("Ignoring press on untouchable {:?}", piece);
            return Err(DragError::NotTouchable(piece));
        }
        let center = visual.local_center();

        if let DragState::Dragging { indicator, .. } = slot.state {
            stage.destroy_indicator(indicator);
            log::debug!("Restarted drag on {:?}", piece);
        }

        // A moving piece stops dead when grabbed
        let units = *driver.units();
        let world = driver.world_mut();
        world.stop(slot.body);

        // Pointer is in the unrotated local frame; recenter on the body origin,
        // turn into world orientation, then move to the body position
        let offset = units.vec_to_sim(local_point) - units.vec_to_sim(center);
        let anchor = rotate(offset, world.angle(slot.body)) + world.position(slot.body);

        let origin = units.vec_to_display(anchor);
        let indicator = stage.spawn_indicator(origin);
        if let Some(visual) = stage.visual_mut(piece) {
            visual.highlighted = true;
        }

        slot.state = DragState::Dragging {
            anchor,
            origin,
            indicator,
        };
        log::debug!(
            "Drag start on {:?}: anchor ({:.3}, {:.3})",
            piece,
            anchor.x,
            anchor.y
        );
        Ok(anchor)
    }

    /// Pointer moved to `point` (display units, arena space). Re-aims the arrow
    /// along the total drag since the press.
    pub fn on_drag_move(
        &mut self,
        piece: EntityId,
        point: Vec2,
        stage: &mut Stage,
    ) -> Result<(), DragError> {
        let (_, _, origin, indicator) = self.active_gesture(piece)?;

        let drag = point - origin;
        if let Some(arrow) = stage.indicator_mut(indicator) {
            arrow.length = drag.length();
            arrow.angle = heading(drag);
        }
        log::trace!("Drag move on {:?}: ({:.1}, {:.1})", piece, drag.x, drag.y);
        Ok(())
    }

    /// Pointer released at `point` (display units, arena space). Flicks the
    /// piece opposite to the drag and returns the impulse applied.
    pub fn on_drag_end(
        &mut self,
        piece: EntityId,
        point: Vec2,
        driver: &mut SimulationDriver,
        stage: &mut Stage,
    ) -> Result<Launch, DragError> {
        let (body, anchor, origin, indicator) = self.active_gesture(piece)?;

        let drag = point - origin;
        let impulse = driver.units().vec_to_sim(-drag * self.config.power);
        driver.world_mut().apply_impulse_at(body, impulse, anchor);

        stage.destroy_indicator(indicator);
        if let Some(visual) = stage.visual_mut(piece) {
            visual.highlighted = false;
        }
        if let Some(slot) = self.pieces.get_mut(&piece) {
            slot.state = DragState::Idle;
        }

        log::debug!(
            "Launched {:?}: impulse ({:.3}, {:.3})",
            piece,
            impulse.x,
            impulse.y
        );
        Ok(Launch { impulse, anchor })
    }

    /// Body, anchor, origin and arrow of a gesture in progress
    fn active_gesture(
        &self,
        piece: EntityId,
    ) -> Result<(BodyHandle, Vec2, Vec2, IndicatorId), DragError> {
        let slot = self.pieces.get(&piece).ok_or(DragError::UnknownPiece(piece))?;
        match slot.state {
            DragState::Dragging {
                anchor,
                origin,
                indicator,
            } => Ok((slot.body, anchor, origin, indicator)),
            DragState::Idle => {
                log::warn!("Ignoring pointer event on {:?}: no drag in progress", piece);
                Err(DragError::NotDragging(piece))
            }
        }
    }
}
