// Implements an unbounded spatial hash grid for broadphase collision detection.

use crate::common::error::{check_dimension, Result};
use std::collections::HashMap;

/// Cell size used by `SpatialHashGrid::default`, matching `WorldConfig::default`.
pub const DEFAULT_CELL_SIZE: f64 = 64.0;

/// Inclusive range of grid cells covered by a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl CellBounds {
    /// Iterates every `(x, y)` cell in the range, row by row.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (self.min_y..=self.max_y).flat_map(move |y| (self.min_x..=self.max_x).map(move |x| (x, y)))
    }

    pub fn cell_count(&self) -> usize {
        let w = (self.max_x as i64 - self.min_x as i64 + 1).max(0);
        let h = (self.max_y as i64 - self.min_y as i64 + 1).max(0);
        (w * h) as usize
    }
}

/// Maps world coordinates into grid cell indices.
pub trait CellIndexer {
    fn cell_index_x(&self, world_x: f64) -> i32;
    fn cell_index_y(&self, world_y: f64) -> i32;
}

/// A spatial index keyed by cell ranges.
///
/// Ids are opaque to the index; the world uses body slot indices.
pub trait SpatialIndex: CellIndexer {
    fn insert(&mut self, id: usize, bounds: CellBounds);
    fn remove(&mut self, id: usize, bounds: CellBounds);
    /// Appends every id sharing a cell with `bounds` to `out`, sorted and
    /// without duplicates.
    fn query(&self, bounds: CellBounds, out: &mut Vec<usize>);
    fn clear(&mut self);
}

/// Uniform grid over an unbounded world, storing only occupied cells.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f64,
    inv_cell_size: f64, // 1.0 / cell_size, cached
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl SpatialHashGrid {
    pub fn new(cell_size: f64) -> Result<Self> {
        let cell_size = check_dimension("cell_size", cell_size)?;
        log::debug!("creating spatial hash grid with cell size {}", cell_size);
        Ok(SpatialHashGrid {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of cells holding at least one id.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Ids stored in a single cell.
    pub fn cell(&self, x: i32, y: i32) -> &[usize] {
        self.cells.get(&(x, y)).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    fn index(&self, coordinate: f64) -> i32 {
        // Float-to-int casts saturate; NaN maps to 0
        (coordinate * self.inv_cell_size).floor() as i32
    }
}

impl Default for SpatialHashGrid {
    fn default() -> Self {
        SpatialHashGrid {
            cell_size: DEFAULT_CELL_SIZE,
            inv_cell_size: 1.0 / DEFAULT_CELL_SIZE,
            cells: HashMap::new(),
        }
    }
}

impl CellIndexer for SpatialHashGrid {
    fn cell_index_x(&self, world_x: f64) -> i32 {
        self.index(world_x)
    }

    fn cell_index_y(&self, world_y: f64) -> i32 {
        self.index(world_y)
    }
}

impl SpatialIndex for SpatialHashGrid {
    fn insert(&mut self, id: usize, bounds: CellBounds) {
        for key in bounds.cells() {
            let bucket = self.cells.entry(key).or_default();
            if !bucket.contains(&id) {
                bucket.push(id);
            }
        }
    }

    fn remove(&mut self, id: usize, bounds: CellBounds) {
        for key in bounds.cells() {
            if let Some(bucket) = self.cells.get_mut(&key) {
                bucket.retain(|&other| other != id);
                if bucket.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
    }

    fn query(&self, bounds: CellBounds, out: &mut Vec<usize>) {
        let start = out.len();
        for key in bounds.cells() {
            if let Some(bucket) = self.cells.get(&key) {
                out.extend_from_slice(bucket);
            }
        }
        out[start..].sort_unstable();
        // dedup only the appended tail
        let mut tail = out.split_off(start);
        tail.dedup();
        out.append(&mut tail);
    }

    fn clear(&mut self) {
        self.cells.clear();
    }
}
