//! Visual placeholders the host renders
//!
//! The stage mirrors the host's scene graph: one `Visual` per body-backed entity
//! and the arrow `Indicator`s shown while a piece is dragged. All values are in
//! display units; the simulation writes here and never reads back.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identity of a visual entity (pieces and walls)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Identity of an arrow indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndicatorId(pub u32);

/// What a visual represents (the host picks sprites from this)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualKind {
    /// Flickable disk
    Piece,
    /// Static boundary rectangle
    Wall,
}

/// A body-backed entity as the host should draw it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visual {
    pub id: EntityId,
    pub kind: VisualKind,
    pub width: f32,
    pub height: f32,
    /// Geometric center
    pub position: Vec2,
    /// Rotation about the center, radians
    pub angle: f32,
    /// Receives pointer events; presses on an untouchable piece are rejected
    pub touchable: bool,
    /// Show the "touched" sprite (set while the piece is held)
    pub highlighted: bool,
}

impl Visual {
    /// Size as a vector
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Center of the entity's own (unrotated) bounds
    #[inline]
    pub fn local_center(&self) -> Vec2 {
        self.size() / 2.0
    }

    /// Upper-left corner, for hosts that place entities by corner
    pub fn top_left(&self) -> Vec2 {
        self.position - self.local_center()
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle.to_degrees()
    }
}

/// Drag direction arrow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub id: IndicatorId,
    /// Tail position (the launch anchor)
    pub position: Vec2,
    /// Direction of the drag, radians
    pub angle: f32,
    /// Drag length
    pub length: f32,
    /// Sprite pivot in normalized sprite coordinates
    pub pivot: Vec2,
}

impl Indicator {
    /// Pivot at the left edge, vertically centered, so the arrow grows from its tail
    pub const PIVOT: Vec2 = Vec2::new(0.0, 0.5);

    /// Uniform sprite scale for a square arrow image of `sprite_size` pixels
    pub fn scale_for(&self, sprite_size: f32) -> f32 {
        self.length / sprite_size
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle.to_degrees()
    }
}

/// All visuals of one scene
#[derive(Debug, Clone, Default)]
pub struct Stage {
    visuals: BTreeMap<EntityId, Visual>,
    indicators: BTreeMap<IndicatorId, Indicator>,
    next_entity: u32,
    next_indicator: u32,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visual of the given display size at `position` (center)
    pub fn spawn_visual(&mut self, kind: VisualKind, size: Vec2, position: Vec2) -> &Visual {
        self.next_entity += 1;
        let id = EntityId(self.next_entity);
        self.visuals.entry(id).or_insert(Visual {
            id,
            kind,
            width: size.x,
            height: size.y,
            position,
            angle: 0.0,
            touchable: kind == VisualKind::Piece,
            highlighted: false,
        })
    }

    pub fn visual(&self, id: EntityId) -> Option<&Visual> {
        self.visuals.get(&id)
    }

    pub fn visual_mut(&mut self, id: EntityId) -> Option<&mut Visual> {
        self.visuals.get_mut(&id)
    }

    /// Visuals in id (creation) order
    pub fn visuals(&self) -> impl Iterator<Item = &Visual> {
        self.visuals.values()
    }

    /// Add a zero-length arrow with its tail at `position`
    pub fn spawn_indicator(&mut self, position: Vec2) -> IndicatorId {
        self.next_indicator += 1;
        let id = IndicatorId(self.next_indicator);
        self.indicators.insert(
            id,
            Indicator {
                id,
                position,
                angle: 0.0,
                length: 0.0,
                pivot: Indicator::PIVOT,
            },
        );
        id
    }

    pub fn indicator(&self, id: IndicatorId) -> Option<&Indicator> {
        self.indicators.get(&id)
    }

    pub fn indicator_mut(&mut self, id: IndicatorId) -> Option<&mut Indicator> {
        self.indicators.get_mut(&id)
    }

    pub fn indicators(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.values()
    }

    /// Remove an indicator. Returns false if it was already gone.
    pub fn destroy_indicator(&mut self, id: IndicatorId) -> bool {
        self.indicators.remove(&id).is_some()
    }

    pub fn indicator_count(&self) -> usize {
        self.indicators.len()
    }
}
