//! The read-only terrain contract consumed by classification and meshing

use crate::core::types::Vec2;

/// Height and unlock state of one grid corner
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerSample {
    pub height: f32,
    pub unlocked: bool,
}

impl CornerSample {
    pub fn new(height: f32, unlocked: bool) -> Self {
        Self { height, unlocked }
    }
}

/// The four corners of one cell.
///
/// "Bottom" is the low-Z edge, "left" the low-X edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellCorners {
    pub bl: CornerSample,
    pub br: CornerSample,
    pub tr: CornerSample,
    pub tl: CornerSample,
}

impl CellCorners {
    /// Corners in bl, br, tr, tl order
    pub fn to_array(&self) -> [CornerSample; 4] {
        [self.bl, self.br, self.tr, self.tl]
    }

    /// Unlock flags in bl, br, tr, tl order
    pub fn unlocked(&self) -> [bool; 4] {
        self.to_array().map(|c| c.unlocked)
    }

    /// Number of unlocked corners (0-4)
    pub fn unlocked_count(&self) -> u8 {
        self.unlocked().iter().filter(|&&u| u).count() as u8
    }
}

/// Size of a corner grid.
///
/// A grid of `cells_x` x `cells_z` cells has one more corner on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDims {
    pub cells_x: u32,
    pub cells_z: u32,
    /// World distance per grid step
    pub cell_size: f32,
}

impl GridDims {
    pub fn new(cells_x: u32, cells_z: u32, cell_size: f32) -> Self {
        Self { cells_x, cells_z, cell_size }
    }

    /// Grid covering a world extent, rounding partial cells up
    pub fn covering(width: f32, height: f32, cell_size: f32) -> Self {
        Self {
            cells_x: (width / cell_size).ceil().max(0.0) as u32,
            cells_z: (height / cell_size).ceil().max(0.0) as u32,
            cell_size,
        }
    }

    pub fn corners_x(&self) -> u32 {
        self.cells_x + 1
    }

    pub fn corners_z(&self) -> u32 {
        self.cells_z + 1
    }

    pub fn cell_count(&self) -> usize {
        self.cells_x as usize * self.cells_z as usize
    }

    pub fn corner_count(&self) -> usize {
        self.corners_x() as usize * self.corners_z() as usize
    }

    pub fn contains_cell(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && (x as u32) < self.cells_x && (z as u32) < self.cells_z
    }

    pub fn contains_corner(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && (x as u32) <= self.cells_x && (z as u32) <= self.cells_z
    }

    /// World-space extent of the grid
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.cells_x as f32, self.cells_z as f32) * self.cell_size
    }
}

/// Read access to terrain corners.
///
/// Every query is total: coordinates outside the grid return a default
/// (height 0, locked) sample instead of failing.
pub trait TerrainSource {
    /// Grid resolution this source answers queries in
    fn dims(&self) -> GridDims;

    /// Corner sample at integer grid coordinates
    fn vertex_at(&self, x: i32, z: i32) -> CornerSample;

    /// All four corners of a cell, or `None` when the cell lies outside the grid
    fn cell_corners(&self, cell_x: i32, cell_z: i32) -> Option<CellCorners> {
        if !self.dims().contains_cell(cell_x, cell_z) {
            return None;
        }
        Some(CellCorners {
            bl: self.vertex_at(cell_x, cell_z),
            br: self.vertex_at(cell_x + 1, cell_z),
            tr: self.vertex_at(cell_x + 1, cell_z + 1),
            tl: self.vertex_at(cell_x, cell_z + 1),
        })
    }

    /// World distance an edit to the underlying data can spread when read
    /// through this source. Zero for sources read at native resolution.
    fn resample_margin(&self) -> f32 {
        0.0
    }
}

impl<T: TerrainSource + ?Sized> TerrainSource for &T {
    fn dims(&self) -> GridDims {
        (**self).dims()
    }

    fn vertex_at(&self, x: i32, z: i32) -> CornerSample {
        (**self).vertex_at(x, z)
    }

    fn cell_corners(&self, cell_x: i32, cell_z: i32) -> Option<CellCorners> {
        (**self).cell_corners(cell_x, cell_z)
    }

    fn resample_margin(&self) -> f32 {
        (**self).resample_margin()
    }
}
