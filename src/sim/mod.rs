//! Deterministic simulation module
//!
//! Everything between the host and the rigid-body solver lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod boundary;
pub mod drag;
pub mod driver;
pub mod scene;
pub mod stage;
pub mod units;
pub mod world;

pub use body::{BodySpec, EntityBinding, MaterialSpec, MotionKind, ShapeSpec, create_body};
pub use boundary::{Boundary, build_boundary};
pub use drag::{DragController, DragState, Launch};
pub use driver::SimulationDriver;
pub use scene::{FlickScene, piece_spec};
pub use stage::{EntityId, Indicator, IndicatorId, Stage, Visual, VisualKind};
pub use units::UnitConverter;
pub use world::{BodyHandle, PhysicsWorld};
