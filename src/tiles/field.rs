//! The full set of tiles covering the map

use crate::classify::{CellClassifier, ClassifyPolicy};
use crate::math::Rect;
use crate::mesh::TileMeshBuilder;
use crate::terrain::TerrainSource;
use super::layout::{TileCoord, TileLayout, TileRange};
use super::tile::Tile;

/// How far, in display cells, a corner change can alter the mesh: neighbour
/// promotion, neighbour-hole cuts and the shared vertex ring, plus one cell of
/// slack. Resampling spread is added on top from
/// [`TerrainSource::resample_margin`].
pub const REGION_REACH_CELLS: f32 = 4.0;

/// Totals over every tile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldStats {
    pub tiles: usize,
    pub active: usize,
    pub vertices: usize,
    pub triangles: usize,
    /// FullUnlocked cells
    pub holes: usize,
}

/// Owns one [`Tile`] per layout slot, created once and rebuilt in place.
///
/// The terrain source is borrowed for each rebuild rather than stored.
pub struct TileField {
    layout: TileLayout,
    builder: TileMeshBuilder,
    policy: ClassifyPolicy,
    tiles: Vec<Tile>,
}

impl TileField {
    /// Allocate every tile with an empty mesh, all active
    pub fn new(layout: TileLayout, builder: TileMeshBuilder, policy: ClassifyPolicy) -> Self {
        let tiles = (0..layout.tile_count())
            .map(|i| {
                let coord = layout.coord(i);
                Tile::new(coord, layout.window(coord))
            })
            .collect();
        Self { layout, builder, policy, tiles }
    }

    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    pub fn builder(&self) -> &TileMeshBuilder {
        &self.builder
    }

    pub fn policy(&self) -> ClassifyPolicy {
        self.policy
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.layout.index(coord).map(|i| &self.tiles[i])
    }

    /// Rebuild one tile's mesh. Returns false for a coordinate outside the grid.
    pub fn regenerate_tile<S: TerrainSource + ?Sized>(&mut self, source: &S, coord: TileCoord) -> bool {
        let Some(index) = self.layout.index(coord) else {
            log::warn!("regenerate_tile: tile {:?} outside {}x{} grid", coord, self.layout.tiles_x(), self.layout.tiles_z());
            return false;
        };
        let classifier = CellClassifier::new(source, self.policy);
        self.rebuild(&classifier, index);
        true
    }

    pub fn regenerate_all<S: TerrainSource + ?Sized>(&mut self, source: &S) {
        let classifier = CellClassifier::new(source, self.policy);
        for index in 0..self.tiles.len() {
            self.rebuild(&classifier, index);
        }
        let stats = self.stats();
        log::info!(
            "Regenerated {} tiles: {} vertices, {} triangles, {} hole cells",
            stats.tiles, stats.vertices, stats.triangles, stats.holes
        );
    }

    /// Rebuild the tiles a change inside `changed` (world units, measured on
    /// the data the source reads from) can affect.
    ///
    /// Returns the number of tiles rebuilt.
    pub fn regenerate_region<S: TerrainSource + ?Sized>(&mut self, source: &S, changed: &Rect) -> usize {
        let reach = REGION_REACH_CELLS * self.layout.dims().cell_size + source.resample_margin();
        let grown = changed.expanded(reach);
        let Some(range) = self.layout.tiles_overlapping(&grown) else {
            return 0;
        };

        let classifier = CellClassifier::new(source, self.policy);
        for coord in range.iter() {
            if let Some(index) = self.layout.index(coord) {
                self.rebuild(&classifier, index);
            }
        }
        log::debug!("Regenerated region {:?}: tiles {:?}..={:?}", changed, range.min, range.max);
        range.tile_count()
    }

    fn rebuild<S: TerrainSource + ?Sized>(&mut self, classifier: &CellClassifier<'_, S>, index: usize) {
        let tile = &mut self.tiles[index];
        let classified = self.builder.build_into(classifier, tile.window, &mut tile.mesh);
        tile.record_classes(&classified);
        log::trace!(
            "Tile {:?}: {} vertices, {} triangles",
            tile.coord, tile.mesh.vertex_count(), tile.mesh.triangle_count()
        );
    }

    pub fn is_tile_active(&self, coord: TileCoord) -> bool {
        self.tile(coord).is_some_and(Tile::is_active)
    }

    /// Set a tile's flag. Returns true when the flag changed.
    pub fn set_tile_active(&mut self, coord: TileCoord, active: bool) -> bool {
        let Some(index) = self.layout.index(coord) else {
            return false;
        };
        let tile = &mut self.tiles[index];
        if tile.active == active {
            return false;
        }
        tile.active = active;
        true
    }

    /// Make exactly the tiles in `range` active.
    ///
    /// Only tiles whose membership differs are touched. Returns
    /// `(activated, deactivated)`.
    pub fn apply_active_range(&mut self, range: Option<TileRange>) -> (usize, usize) {
        let mut activated = 0;
        let mut deactivated = 0;
        for tile in &mut self.tiles {
            let wanted = range.is_some_and(|r| r.contains(tile.coord));
            if tile.active != wanted {
                tile.active = wanted;
                if wanted {
                    activated += 1;
                } else {
                    deactivated += 1;
                }
            }
        }
        (activated, deactivated)
    }

    pub fn active_tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.active).count()
    }

    pub fn stats(&self) -> FieldStats {
        self.tiles.iter().fold(
            FieldStats { tiles: self.tiles.len(), ..Default::default() },
            |mut stats, tile| {
                stats.active += tile.active as usize;
                stats.vertices += tile.mesh.vertex_count();
                stats.triangles += tile.mesh.triangle_count();
                stats.holes += tile.hole_count();
                stats
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::CellClass;
    use crate::core::types::Vec2;
    use crate::mesh::CutPolicy;
    use crate::terrain::{DisplayGrid, GridDims, TerrainGrid};

    fn field_for<S: TerrainSource>(source: &S, cells_per_tile: u32) -> TileField {
        let layout = TileLayout::new(source.dims(), cells_per_tile, cells_per_tile);
        let mut field = TileField::new(layout, TileMeshBuilder::new(CutPolicy::NeighborDiagonal, true), ClassifyPolicy::Ringed);
        field.regenerate_all(source);
        field
    }

    #[test]
    fn test_new_field_is_all_active() {
        let grid = TerrainGrid::new(GridDims::new(500, 500, 1.0));
        let layout = TileLayout::with_footprint(grid.dims(), 50.0, 50.0);
        let field = TileField::new(layout, TileMeshBuilder::default(), ClassifyPolicy::Ringed);
        assert_eq!(field.tiles().len(), 100);
        assert_eq!(field.active_tile_count(), 100);
        assert!(field.tiles().iter().all(|t| t.mesh.is_empty()));
    }

    #[test]
    fn test_regenerate_all_stats() {
        let mut grid = TerrainGrid::new(GridDims::new(20, 20, 1.0));
        grid.unlock_corners(8, 8, 12, 12);
        let field = field_for(&grid, 8);

        let stats = field.stats();
        assert_eq!(stats.tiles, 9);
        assert_eq!(stats.active, 9);
        assert_eq!(stats.holes, 16);
        assert_eq!(stats.vertices, field.tiles().iter().map(|t| t.mesh.vertex_count()).sum::<usize>());

        // The hole block starts on the tile boundary at x = 8, z = 8
        let center = field.tile(TileCoord::new(1, 1)).unwrap();
        assert_eq!(center.hole_count(), 16);
        assert_eq!(center.class_count(CellClass::FullLocked) + center.class_count(CellClass::AdjacentUnlocked)
            + center.class_count(CellClass::PartialUnlocked) + 16, 64);
        assert!(field.tile(TileCoord::new(2, 2)).unwrap().mesh.bounds.max.x == 20.0);
    }

    #[test]
    fn test_regenerate_tile_out_of_range() {
        let grid = TerrainGrid::new(GridDims::new(10, 10, 1.0));
        let mut field = field_for(&grid, 5);
        assert!(field.regenerate_tile(&grid, TileCoord::new(1, 1)));
        assert!(!field.regenerate_tile(&grid, TileCoord::new(2, 0)));
    }

    #[test]
    fn test_regenerate_region_matches_full_rebuild() {
        let mut grid = TerrainGrid::new(GridDims::new(40, 40, 1.0));
        grid.unlock_corners(2, 2, 6, 6);
        let mut field = field_for(&grid, 8);

        // Circle near a tile corner so changes spill into neighbours
        let changed = grid.unlock_circle(Vec2::new(23.5, 16.5), 3.0).unwrap();
        let rebuilt = field.regenerate_region(&grid, &changed);
        assert!(rebuilt > 1 && rebuilt < 25);

        let fresh = field_for(&grid, 8);
        for (a, b) in field.tiles().iter().zip(fresh.tiles()) {
            assert_eq!(a.mesh, b.mesh, "tile {:?} stale after region rebuild", a.coord);
        }
        assert_eq!(field.stats(), fresh.stats());
    }

    #[test]
    fn test_regenerate_region_through_coarse_data_grid() {
        // 128x128 display cells over data grids 4x and 8x coarser
        for (data_cells, data_cell) in [(32, 4.0), (16, 8.0)] {
            for cells_per_tile in 3..=10 {
                let data = TerrainGrid::new(GridDims::new(data_cells, data_cells, data_cell));
                let mut display = DisplayGrid::new(data, 1.0);
                let mut field = field_for(&display, cells_per_tile);

                for (center, radius) in [(Vec2::new(37.0, 61.0), 2.5 * data_cell), (Vec2::new(90.0, 22.0), 1.2 * data_cell)] {
                    let changed = display.inner_mut().unlock_circle(center, radius).unwrap();
                    field.regenerate_region(&display, &changed);

                    let fresh = field_for(&display, cells_per_tile);
                    let stale: Vec<_> = field
                        .tiles()
                        .iter()
                        .zip(fresh.tiles())
                        .filter(|(a, b)| a.mesh != b.mesh)
                        .map(|(a, _)| a.coord)
                        .collect();
                    assert!(
                        stale.is_empty(),
                        "data cell {}, {}-cell tiles: stale tiles {:?}",
                        data_cell, cells_per_tile, stale
                    );
                }
            }
        }
    }

    #[test]
    fn test_regenerate_region_outside_map() {
        let grid = TerrainGrid::new(GridDims::new(10, 10, 1.0));
        let mut field = field_for(&grid, 5);
        let far = Rect::new(Vec2::splat(100.0), Vec2::splat(120.0));
        assert_eq!(field.regenerate_region(&grid, &far), 0);
    }

    #[test]
    fn test_active_flags() {
        let grid = TerrainGrid::new(GridDims::new(10, 10, 1.0));
        let mut field = field_for(&grid, 5);
        assert!(field.set_tile_active(TileCoord::new(0, 1), false));
        assert!(!field.set_tile_active(TileCoord::new(0, 1), false));
        assert!(!field.is_tile_active(TileCoord::new(0, 1)));
        assert!(!field.is_tile_active(TileCoord::new(7, 7)));
        assert_eq!(field.active_tile_count(), 3);

        let range = TileRange::new(TileCoord::new(0, 0), TileCoord::new(0, 1));
        assert_eq!(field.apply_active_range(Some(range)), (1, 2));
        assert_eq!(field.apply_active_range(Some(range)), (0, 0));
        assert_eq!(field.apply_active_range(None), (0, 2));
        assert_eq!(field.active_tile_count(), 0);
    }
}
