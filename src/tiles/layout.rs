//! Partition of the cell grid into fixed-footprint tiles

use crate::classify::CellWindow;
use crate::core::types::Vec2;
use crate::math::Rect;
use crate::terrain::GridDims;

/// Integer coordinate of a tile in the tile grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub x: u32,
    pub z: u32,
}

impl TileCoord {
    pub fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }
}

/// Inclusive rectangle of tile coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRange {
    pub min: TileCoord,
    pub max: TileCoord,
}

impl TileRange {
    pub fn new(min: TileCoord, max: TileCoord) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        (self.min.x..=self.max.x).contains(&coord.x) && (self.min.z..=self.max.z).contains(&coord.z)
    }

    pub fn tile_count(&self) -> usize {
        (self.max.x - self.min.x + 1) as usize * (self.max.z - self.min.z + 1) as usize
    }

    /// Coordinates in row-major order (z outer)
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (self.min.z..=self.max.z).flat_map(move |z| (self.min.x..=self.max.x).map(move |x| TileCoord::new(x, z)))
    }
}

/// How the map's cells are split into tiles.
///
/// Every tile except those on the +X / +Z edges spans exactly
/// `cells_per_tile` cells; edge tiles take the remainder. Tiles never overlap
/// and together cover every cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileLayout {
    dims: GridDims,
    cells_per_tile_x: u32,
    cells_per_tile_z: u32,
    tiles_x: u32,
    tiles_z: u32,
}

impl TileLayout {
    pub fn new(dims: GridDims, cells_per_tile_x: u32, cells_per_tile_z: u32) -> Self {
        let cells_per_tile_x = cells_per_tile_x.max(1);
        let cells_per_tile_z = cells_per_tile_z.max(1);
        Self {
            dims,
            cells_per_tile_x,
            cells_per_tile_z,
            tiles_x: dims.cells_x.div_ceil(cells_per_tile_x),
            tiles_z: dims.cells_z.div_ceil(cells_per_tile_z),
        }
    }

    /// Layout from a world-space tile footprint, rounded to whole cells
    pub fn with_footprint(dims: GridDims, tile_width: f32, tile_height: f32) -> Self {
        let cells = |extent: f32| (extent / dims.cell_size).round().max(1.0) as u32;
        Self::new(dims, cells(tile_width), cells(tile_height))
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    pub fn tiles_z(&self) -> u32 {
        self.tiles_z
    }

    pub fn tile_count(&self) -> usize {
        self.tiles_x as usize * self.tiles_z as usize
    }

    pub fn cells_per_tile(&self) -> (u32, u32) {
        (self.cells_per_tile_x, self.cells_per_tile_z)
    }

    /// World size of a full (non-edge) tile
    pub fn footprint(&self) -> Vec2 {
        Vec2::new(
            self.cells_per_tile_x as f32 * self.dims.cell_size,
            self.cells_per_tile_z as f32 * self.dims.cell_size,
        )
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.x < self.tiles_x && coord.z < self.tiles_z
    }

    /// Row-major tile index
    pub fn index(&self, coord: TileCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.z as usize * self.tiles_x as usize + coord.x as usize)
    }

    pub fn coord(&self, index: usize) -> TileCoord {
        let tiles_x = self.tiles_x.max(1) as usize;
        TileCoord::new((index % tiles_x) as u32, (index / tiles_x) as u32)
    }

    /// Cells covered by a tile, clipped to the map
    pub fn window(&self, coord: TileCoord) -> CellWindow {
        let x0 = coord.x * self.cells_per_tile_x;
        let z0 = coord.z * self.cells_per_tile_z;
        let cells_x = self.cells_per_tile_x.min(self.dims.cells_x.saturating_sub(x0));
        let cells_z = self.cells_per_tile_z.min(self.dims.cells_z.saturating_sub(z0));
        CellWindow::new(x0 as i32, z0 as i32, cells_x, cells_z)
    }

    /// Ground-plane rectangle covered by a tile
    pub fn world_rect(&self, coord: TileCoord) -> Rect {
        let w = self.window(coord);
        let size = self.dims.cell_size;
        let min = Vec2::new(w.origin_x as f32, w.origin_z as f32) * size;
        Rect::new(min, min + Vec2::new(w.cells_x as f32, w.cells_z as f32) * size)
    }

    pub fn full_range(&self) -> Option<TileRange> {
        if self.tile_count() == 0 {
            return None;
        }
        Some(TileRange::new(TileCoord::new(0, 0), TileCoord::new(self.tiles_x - 1, self.tiles_z - 1)))
    }

    /// Tiles touched by a ground-plane rectangle.
    ///
    /// Indices are floor(rect / footprint) clamped to the grid. A rectangle
    /// that misses the map entirely selects nothing.
    pub fn tiles_overlapping(&self, rect: &Rect) -> Option<TileRange> {
        let full = self.full_range()?;
        let map = Rect::new(Vec2::ZERO, self.dims.world_size());
        if !map.intersects(rect) {
            return None;
        }

        let footprint = self.footprint();
        let lo = (rect.min / footprint).floor();
        let hi = (rect.max / footprint).floor();
        let clamp = |v: f32, max: u32| v.clamp(0.0, max as f32) as u32;

        Some(TileRange::new(
            TileCoord::new(clamp(lo.x, full.max.x), clamp(lo.y, full.max.z)),
            TileCoord::new(clamp(hi.x, full.max.x), clamp(hi.y, full.max.z)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_500() -> TileLayout {
        TileLayout::with_footprint(GridDims::new(500, 500, 1.0), 50.0, 50.0)
    }

    #[test]
    fn test_even_split() {
        let layout = map_500();
        assert_eq!((layout.tiles_x(), layout.tiles_z()), (10, 10));
        assert_eq!(layout.tile_count(), 100);
        assert_eq!(layout.footprint(), Vec2::splat(50.0));
        assert_eq!(layout.window(TileCoord::new(9, 3)), CellWindow::new(450, 150, 50, 50));
    }

    #[test]
    fn test_edge_tiles_take_remainder() {
        let layout = TileLayout::new(GridDims::new(23, 10, 2.0), 10, 4);
        assert_eq!((layout.tiles_x(), layout.tiles_z()), (3, 3));
        assert_eq!(layout.window(TileCoord::new(2, 2)), CellWindow::new(20, 8, 3, 2));
        assert_eq!(layout.world_rect(TileCoord::new(2, 2)), Rect::new(Vec2::new(40.0, 16.0), Vec2::new(46.0, 20.0)));

        // No gaps, no overlaps
        let covered: usize = (0..layout.tile_count())
            .map(|i| layout.window(layout.coord(i)).cell_count())
            .sum();
        assert_eq!(covered, 230);
    }

    #[test]
    fn test_footprint_rounds_to_cells() {
        let layout = TileLayout::with_footprint(GridDims::new(100, 100, 3.0), 50.0, 0.5);
        assert_eq!(layout.cells_per_tile(), (17, 1));
        assert_eq!(layout.footprint(), Vec2::new(51.0, 3.0));
    }

    #[test]
    fn test_index_round_trip() {
        let layout = map_500();
        let coord = TileCoord::new(4, 7);
        let index = layout.index(coord).unwrap();
        assert_eq!(index, 74);
        assert_eq!(layout.coord(index), coord);
        assert_eq!(layout.index(TileCoord::new(10, 0)), None);
    }

    #[test]
    fn test_tiles_overlapping() {
        let layout = map_500();
        let range = layout.tiles_overlapping(&Rect::new(Vec2::splat(85.0), Vec2::splat(165.0))).unwrap();
        assert_eq!(range, TileRange::new(TileCoord::new(1, 1), TileCoord::new(3, 3)));
        assert_eq!(range.tile_count(), 9);
        assert_eq!(range.iter().count(), 9);
        assert!(range.contains(TileCoord::new(2, 3)));
        assert!(!range.contains(TileCoord::new(0, 3)));

        let clamped = layout.tiles_overlapping(&Rect::new(Vec2::splat(-40.0), Vec2::splat(900.0))).unwrap();
        assert_eq!(clamped, layout.full_range().unwrap());

        assert_eq!(layout.tiles_overlapping(&Rect::new(Vec2::splat(-40.0), Vec2::splat(-5.0))), None);
    }

    #[test]
    fn test_empty_map() {
        let layout = TileLayout::new(GridDims::new(0, 0, 1.0), 8, 8);
        assert_eq!(layout.tile_count(), 0);
        assert_eq!(layout.full_range(), None);
        assert_eq!(layout.tiles_overlapping(&Rect::new(Vec2::ZERO, Vec2::ONE)), None);
    }
}
