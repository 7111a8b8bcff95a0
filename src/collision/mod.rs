pub mod aabb;
pub mod broad_phase;
pub mod detection;
pub mod manifold;
pub mod narrow_phase;
pub mod spatial_grid;

// Re-export key types
pub use aabb::AABB;
pub use broad_phase::PhysicsEntity;
pub use detection::{intersects_circle_polygon, intersects_circles, intersects_polygons, overlaps, project, Interval};
pub use manifold::{CollisionManifold, ContactManifold, MAX_CONTACTS};
pub use narrow_phase::{NarrowPhase, SatDetector};
pub use spatial_grid::{CellBounds, CellIndexer, SpatialHashGrid, SpatialIndex};
