//! 2D rigid-body physics core.
//!
//! Bodies cache their world-space geometry lazily and rebuild it at most
//! once per state change. `PhysicsWorld` runs the per-tick pipeline over
//! a pluggable spatial index and narrow phase.

pub mod collision;
pub mod common;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{
    CellBounds, CellIndexer, CollisionManifold, ContactManifold, NarrowPhase, PhysicsEntity, SatDetector,
    SpatialHashGrid, SpatialIndex, AABB,
};
pub use common::{Material, PhysicsError, Result, WorldConfig};
pub use math::{Transform, Vec2};
pub use objects::{BodyHandle, BodyState, RigidBody};
pub use shapes::{Shape, ShapeKind};
pub use world::{PhysicsWorld, StepReport, TickPhase};
