//! A single tile: its cells, mesh and activation flag

use crate::classify::{CellClass, CellWindow, ClassifiedWindow};
use crate::mesh::TileMesh;
use super::layout::TileCoord;

/// One tile of the fog field.
///
/// The mesh is cleared and rewritten in place on every regeneration; the
/// activation flag is only changed by culling.
#[derive(Clone, Debug)]
pub struct Tile {
    pub coord: TileCoord,
    pub window: CellWindow,
    pub mesh: TileMesh,
    pub(crate) active: bool,
    /// Cells per class from the last build, indexed by [`CellClass::order`]
    class_counts: [usize; 4],
}

impl Tile {
    pub fn new(coord: TileCoord, window: CellWindow) -> Self {
        Self {
            coord,
            window,
            mesh: TileMesh::default(),
            active: true,
            class_counts: [0; 4],
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of hole cells (FullUnlocked) in the last build
    pub fn hole_count(&self) -> usize {
        self.class_count(CellClass::FullUnlocked)
    }

    pub fn class_count(&self, class: CellClass) -> usize {
        self.class_counts[class.order() as usize]
    }

    pub(crate) fn record_classes(&mut self, classified: &ClassifiedWindow) {
        self.class_counts = classified.class_counts();
    }
}
