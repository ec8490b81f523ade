//! SpatialHash - uniform grid over 3D space
//!
//! Maps quantized (x, y, z) cells to the body slots resident in them.
//! Rebuilt from scratch once per frame; there is no incremental update.
//!
//! Positions must be finite. NaN/Infinity produce meaningless cell keys and
//! have to be filtered by the caller.

use std::collections::HashMap;

use crate::domain::Coords;

pub type CellKey = (i32, i32, i32);

pub struct SpatialHash {
    cell_size: f32,
    inv_cell_size: f32,
    cells: HashMap<CellKey, Vec<u32>>,
    len: usize,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
            len: 0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.cell_size = cell_size;
        self.inv_cell_size = 1.0 / cell_size;
        self.clear();
    }

    #[inline]
    pub fn key(&self, x: f32, y: f32, z: f32) -> CellKey {
        (
            (x * self.inv_cell_size).floor() as i32,
            (y * self.inv_cell_size).floor() as i32,
            (z * self.inv_cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }

    pub fn insert(&mut self, slot: u32, position: &Coords) {
        let key = self.key(position.x, position.y, position.z);
        self.cells.entry(key).or_default().push(slot);
        self.len += 1;
    }

    /// Union of the 3x3x3 block of cells around `position`'s cell.
    ///
    /// Broad-phase query only; the solver does not use it for collision
    /// response (the ground plane is the only collider).
    pub fn query_neighbors(&self, position: &Coords) -> Vec<u32> {
        let mut found = Vec::new();
        self.for_each_neighbor(position, |slot| found.push(slot));
        found
    }

    pub fn for_each_neighbor(&self, position: &Coords, mut f: impl FnMut(u32)) {
        let (cx, cy, cz) = self.key(position.x, position.y, position.z);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(slots) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) {
                        slots.iter().copied().for_each(&mut f);
                    }
                }
            }
        }
    }

    pub fn cell(&self, key: CellKey) -> Option<&[u32]> {
        self.cells.get(&key).map(Vec::as_slice)
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Total number of inserted slots across all cells
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &[u32])> {
        self.cells.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
