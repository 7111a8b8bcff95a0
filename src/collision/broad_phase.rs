use super::spatial_grid::{CellBounds, CellIndexer};
use crate::objects::RigidBody;

/// A body as seen by the broad phase: the body plus the grid cells it was
/// last filed under.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsEntity {
    body: RigidBody,
    bucket: Option<CellBounds>,
}

impl PhysicsEntity {
    pub fn new(body: RigidBody) -> Self {
        PhysicsEntity { body, bucket: None }
    }

    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    pub fn into_body(self) -> RigidBody {
        self.body
    }

    /// Cell range cached by the last `fill_entity_bounds`, if any.
    pub fn bucket_bounds(&self) -> Option<CellBounds> {
        self.bucket
    }

    /// Cell range covered by the body's current AABB.
    pub fn cell_bounds<G: CellIndexer + ?Sized>(&mut self, grid: &G) -> CellBounds {
        let aabb = self.body.aabb();
        CellBounds {
            min_x: grid.cell_index_x(aabb.min.x),
            min_y: grid.cell_index_y(aabb.min.y),
            max_x: grid.cell_index_x(aabb.max.x),
            max_y: grid.cell_index_y(aabb.max.y),
        }
    }

    /// Converts the AABB into cell space and caches it as the bucket bounds.
    pub fn fill_entity_bounds<G: CellIndexer + ?Sized>(&mut self, grid: &G) -> CellBounds {
        let bounds = self.cell_bounds(grid);
        self.bucket = Some(bounds);
        bounds
    }

    /// True when the body's cell range no longer matches the cached
    /// bucket bounds (or it was never filed).
    pub fn is_grid_cache_old<G: CellIndexer + ?Sized>(&mut self, grid: &G) -> bool {
        let current = self.cell_bounds(grid);
        self.bucket != Some(current)
    }

    /// Forgets the cached placement. Returns the old bounds.
    pub(crate) fn take_bucket(&mut self) -> Option<CellBounds> {
        self.bucket.take()
    }
}
