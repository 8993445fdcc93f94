//! Display-resolution view over a terrain source
//!
//! Meshes are built on a display grid that may be finer (or coarser) than the
//! grid the terrain data is stored at. Each display corner maps to the nearest
//! data corner, so unlock state is never interpolated.

use super::source::{CornerSample, GridDims, TerrainSource};

/// Nearest-neighbor resampling of a source onto a different cell size
#[derive(Clone, Debug)]
pub struct DisplayGrid<S> {
    source: S,
    dims: GridDims,
    /// Data grid steps per display grid step
    scale: f32,
}

impl<S: TerrainSource> DisplayGrid<S> {
    /// Wrap `source`, answering queries on a grid with `cell_size` spacing
    /// that covers the same world extent.
    pub fn new(source: S, cell_size: f32) -> Self {
        let data = source.dims();
        let extent = data.world_size();
        let dims = GridDims::new(
            (extent.x / cell_size).round() as u32,
            (extent.y / cell_size).round() as u32,
            cell_size,
        );
        Self {
            source,
            dims,
            scale: cell_size / data.cell_size,
        }
    }

    pub fn inner(&self) -> &S {
        &self.source
    }

    /// Mutable access for unlock edits; display dims stay fixed
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Nearest data-grid corner for a display-grid corner
    pub fn to_data(&self, x: i32, z: i32) -> (i32, i32) {
        (
            (x as f32 * self.scale).round() as i32,
            (z as f32 * self.scale).round() as i32,
        )
    }
}

impl<S: TerrainSource> TerrainSource for DisplayGrid<S> {
    fn dims(&self) -> GridDims {
        self.dims
    }

    fn vertex_at(&self, x: i32, z: i32) -> CornerSample {
        if !self.dims.contains_corner(x, z) {
            return CornerSample::default();
        }
        let (dx, dz) = self.to_data(x, z);
        self.source.vertex_at(dx, dz)
    }

    /// Nearest-neighbour rounding lets one data corner show up to half a
    /// data cell away from where it sits
    fn resample_margin(&self) -> f32 {
        self.source.dims().cell_size * 0.5 + self.source.resample_margin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::grid::{TerrainGrid, TerrainSample};

    /// 4x4 data cells of size 2, height = data x, unlocked where data x >= 2
    fn data() -> TerrainGrid {
        TerrainGrid::from_fn(GridDims::new(4, 4, 2.0), |x, _| TerrainSample {
            height: x as f32,
            unlocked: x >= 2,
            ..Default::default()
        })
    }

    #[test]
    fn test_resample_margin() {
        assert_eq!(data().resample_margin(), 0.0);
        assert_eq!(DisplayGrid::new(data(), 1.0).resample_margin(), 1.0);
        assert_eq!(DisplayGrid::new(data(), 4.0).resample_margin(), 1.0);

        let nested = DisplayGrid::new(DisplayGrid::new(data(), 1.0), 0.5);
        assert_eq!(nested.resample_margin(), 1.5);
    }

    #[test]
    fn test_finer_display_dims() {
        let display = DisplayGrid::new(data(), 1.0);
        assert_eq!(display.dims(), GridDims::new(8, 8, 1.0));
    }

    #[test]
    fn test_nearest_neighbor_mapping() {
        let display = DisplayGrid::new(data(), 1.0);
        assert_eq!(display.to_data(0, 0), (0, 0));
        assert_eq!(display.to_data(4, 6), (2, 3));
        assert_eq!(display.vertex_at(4, 0).height, 2.0);
        assert!(display.vertex_at(4, 0).unlocked);
        assert!(!display.vertex_at(2, 0).unlocked);
        assert_eq!(display.vertex_at(8, 8).height, 4.0);
    }

    #[test]
    fn test_outside_display_is_default() {
        let display = DisplayGrid::new(data(), 1.0);
        assert_eq!(display.vertex_at(9, 0), CornerSample::default());
        assert!(display.cell_corners(8, 0).is_none());
        assert!(display.cell_corners(7, 7).is_some());
    }

    #[test]
    fn test_same_resolution_is_identity() {
        let grid = data();
        let display = DisplayGrid::new(&grid, 2.0);
        assert_eq!(display.dims(), grid.dims());
        for z in 0..=4 {
            for x in 0..=4 {
                assert_eq!(display.vertex_at(x, z), grid.vertex_at(x, z));
            }
        }
    }

    #[test]
    fn test_inner_mut_edits_show_through() {
        let mut display = DisplayGrid::new(data(), 1.0);
        assert!(display.inner_mut().set_unlocked(0, 0, true));
        assert!(display.vertex_at(0, 0).unlocked);
        assert_eq!(display.inner().unlocked_count(), 16);
    }
}
