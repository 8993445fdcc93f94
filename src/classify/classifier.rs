//! Multi-pass cell classification over a window

use crate::terrain::{CellCorners, TerrainSource};
use super::class::{CellClass, ClassifyPolicy};
use super::window::{Cell, CellWindow, ClassifiedWindow};

/// 4-connected neighbour offsets: left (-x), right (+x), down (-z), up (+z)
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Classifies cells from a borrowed terrain source.
///
/// Classification is a pure function of the source: any cell can be
/// re-derived at any time with [`CellClassifier::classify_cell`], so windows
/// never need to share state with each other.
pub struct CellClassifier<'a, S: TerrainSource + ?Sized> {
    source: &'a S,
    policy: ClassifyPolicy,
}

impl<'a, S: TerrainSource + ?Sized> CellClassifier<'a, S> {
    pub fn new(source: &'a S, policy: ClassifyPolicy) -> Self {
        Self { source, policy }
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    pub fn policy(&self) -> ClassifyPolicy {
        self.policy
    }

    /// Corner-count classification; FullLocked outside the grid
    pub fn base_class(&self, gx: i32, gz: i32) -> CellClass {
        self.source
            .cell_corners(gx, gz)
            .map_or(CellClass::FullLocked, |c| CellClass::from_unlocked_count(c.unlocked_count()))
    }

    /// Class after the FullUnlocked-neighbour promotion
    fn promoted_class(&self, gx: i32, gz: i32) -> CellClass {
        let base = self.base_class(gx, gz);
        if base == CellClass::FullUnlocked || !self.source.dims().contains_cell(gx, gz) {
            return base;
        }
        let touches_hole = NEIGHBOR_OFFSETS
            .iter()
            .any(|&(dx, dz)| self.base_class(gx + dx, gz + dz) == CellClass::FullUnlocked);
        if touches_hole { CellClass::PartialUnlocked } else { base }
    }

    /// Final classification of a single cell, without a window
    pub fn classify_cell(&self, gx: i32, gz: i32) -> CellClass {
        if !self.source.dims().contains_cell(gx, gz) {
            return CellClass::FullLocked;
        }
        match self.policy {
            ClassifyPolicy::Base => self.base_class(gx, gz),
            ClassifyPolicy::Ringed => {
                let promoted = self.promoted_class(gx, gz);
                if promoted != CellClass::FullLocked {
                    return promoted;
                }
                let borders_partial = NEIGHBOR_OFFSETS
                    .iter()
                    .any(|&(dx, dz)| self.promoted_class(gx + dx, gz + dz) == CellClass::PartialUnlocked);
                if borders_partial { CellClass::AdjacentUnlocked } else { CellClass::FullLocked }
            }
        }
    }

    /// Classify every cell of a window.
    ///
    /// Each pass reads only the previous pass's snapshot, so results do not
    /// depend on iteration order. Neighbours outside the window fall back to
    /// their corner-count class read straight from the source.
    pub fn classify_window(&self, window: CellWindow) -> ClassifiedWindow {
        let dims = self.source.dims();
        let mut cells = Vec::with_capacity(window.cell_count());

        // Pass 1: corner counts
        for lz in 0..window.cells_z {
            for lx in 0..window.cells_x {
                let (gx, gz) = window.to_global(lx, lz);
                let (corners, class) = match self.source.cell_corners(gx, gz) {
                    Some(c) => (c, CellClass::from_unlocked_count(c.unlocked_count())),
                    None => (CellCorners::default(), CellClass::FullLocked),
                };
                cells.push(Cell {
                    local_x: lx,
                    local_z: lz,
                    global_x: gx,
                    global_z: gz,
                    corners,
                    class,
                });
            }
        }

        if self.policy == ClassifyPolicy::Ringed {
            // Pass 2: touching a hole makes a cell at least partially unlocked
            let snapshot: Vec<CellClass> = cells.iter().map(|c| c.class).collect();
            for cell in cells.iter_mut() {
                if cell.class == CellClass::FullUnlocked || !dims.contains_cell(cell.global_x, cell.global_z) {
                    continue;
                }
                if self.any_neighbor(window, &snapshot, cell, CellClass::FullUnlocked) {
                    cell.class = CellClass::PartialUnlocked;
                }
            }

            // Pass 3: locked cells bordering partial ones form the adjacent ring
            let snapshot: Vec<CellClass> = cells.iter().map(|c| c.class).collect();
            for cell in cells.iter_mut() {
                if cell.class != CellClass::FullLocked || !dims.contains_cell(cell.global_x, cell.global_z) {
                    continue;
                }
                if self.any_neighbor(window, &snapshot, cell, CellClass::PartialUnlocked) {
                    cell.class = CellClass::AdjacentUnlocked;
                }
            }
        }

        let classified = ClassifiedWindow { window, cells };
        log::trace!(
            "Classified window {:?}: counts {:?}",
            window, classified.class_counts()
        );
        classified
    }

    fn any_neighbor(&self, window: CellWindow, snapshot: &[CellClass], cell: &Cell, target: CellClass) -> bool {
        NEIGHBOR_OFFSETS.iter().any(|&(dx, dz)| {
            let (nx, nz) = (cell.global_x + dx, cell.global_z + dz);
            let class = match window.index_of_global(nx, nz) {
                Some(i) => snapshot[i],
                None => self.base_class(nx, nz),
            };
            class == target
        })
    }

    /// Class of any global cell: the window's result when inside it,
    /// otherwise re-derived from the source
    pub fn class_of(&self, classified: &ClassifiedWindow, gx: i32, gz: i32) -> CellClass {
        match classified.get_global(gx, gz) {
            Some(cell) => cell.class,
            None => self.classify_cell(gx, gz),
        }
    }

    /// Highest class among the up to four cells sharing corner `(gx, gz)`
    pub fn vertex_class(&self, classified: &ClassifiedWindow, gx: i32, gz: i32) -> CellClass {
        [(gx - 1, gz - 1), (gx, gz - 1), (gx - 1, gz), (gx, gz)]
            .into_iter()
            .map(|(cx, cz)| self.class_of(classified, cx, cz))
            .max()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{GridDims, TerrainGrid};

    /// 10x10 cells with the center 2x2 cells fully unlocked (corners 4..=6)
    fn center_block() -> TerrainGrid {
        let mut grid = TerrainGrid::new(GridDims::new(10, 10, 1.0));
        grid.unlock_corners(4, 4, 6, 6);
        grid
    }

    /// Deterministic scattered unlock pattern
    fn scattered(seed: u32) -> TerrainGrid {
        let mut grid = TerrainGrid::new(GridDims::new(12, 12, 1.0));
        let mut state = seed.max(1);
        for z in 0..=12 {
            for x in 0..=12 {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                if state % 3 == 0 {
                    grid.set_unlocked(x, z, true);
                }
            }
        }
        grid
    }

    #[test]
    fn test_base_policy_center_block() {
        let grid = center_block();
        let classifier = CellClassifier::new(&grid, ClassifyPolicy::Base);
        let result = classifier.classify_window(CellWindow::whole_map(grid.dims()));

        assert_eq!(result.count(CellClass::FullUnlocked), 4);
        assert_eq!(result.count(CellClass::PartialUnlocked), 12);
        assert_eq!(result.count(CellClass::AdjacentUnlocked), 0);
        assert_eq!(result.count(CellClass::FullLocked), 84);

        for (x, z) in [(4, 4), (5, 4), (4, 5), (5, 5)] {
            assert_eq!(result.get(x, z).unwrap().class, CellClass::FullUnlocked);
        }
        assert_eq!(result.get(3, 3).unwrap().class, CellClass::PartialUnlocked);
        assert_eq!(result.get(6, 4).unwrap().class, CellClass::PartialUnlocked);
    }

    #[test]
    fn test_ringed_policy_marks_adjacent_ring() {
        let grid = center_block();
        let classifier = CellClassifier::new(&grid, ClassifyPolicy::Ringed);
        let result = classifier.classify_window(CellWindow::whole_map(grid.dims()));

        assert_eq!(result.count(CellClass::FullUnlocked), 4);
        assert_eq!(result.count(CellClass::PartialUnlocked), 12);
        // One cell outward from each side of the 4x4 partial block
        assert_eq!(result.count(CellClass::AdjacentUnlocked), 16);
        assert_eq!(result.get(2, 4).unwrap().class, CellClass::AdjacentUnlocked);
        assert_eq!(result.get(7, 6).unwrap().class, CellClass::AdjacentUnlocked);
        // Diagonal corner of the ring stays locked
        assert_eq!(result.get(2, 2).unwrap().class, CellClass::FullLocked);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let grid = scattered(7);
        let classifier = CellClassifier::new(&grid, ClassifyPolicy::Ringed);
        let window = CellWindow::new(2, 3, 6, 5);
        assert_eq!(classifier.classify_window(window), classifier.classify_window(window));
    }

    #[test]
    fn test_sub_windows_match_whole_map() {
        for policy in [ClassifyPolicy::Base, ClassifyPolicy::Ringed] {
            let grid = scattered(99);
            let classifier = CellClassifier::new(&grid, policy);
            let whole = classifier.classify_window(CellWindow::whole_map(grid.dims()));

            for tz in 0..3 {
                for tx in 0..3 {
                    let window = CellWindow::new(tx * 4, tz * 4, 4, 4);
                    let part = classifier.classify_window(window);
                    for cell in part.cells() {
                        let flat = whole.get_global(cell.global_x, cell.global_z).unwrap();
                        assert_eq!(cell, &Cell { local_x: cell.local_x, local_z: cell.local_z, ..*flat });
                    }
                }
            }
        }
    }

    #[test]
    fn test_classify_cell_matches_window() {
        let grid = scattered(1234);
        let classifier = CellClassifier::new(&grid, ClassifyPolicy::Ringed);
        let whole = classifier.classify_window(CellWindow::whole_map(grid.dims()));
        for cell in whole.cells() {
            assert_eq!(classifier.classify_cell(cell.global_x, cell.global_z), cell.class);
        }
    }

    #[test]
    fn test_out_of_map_cells_are_locked() {
        let mut grid = TerrainGrid::new(GridDims::new(4, 4, 1.0));
        grid.unlock_corners(0, 0, 4, 4);
        let classifier = CellClassifier::new(&grid, ClassifyPolicy::Ringed);

        assert_eq!(classifier.classify_cell(-1, 0), CellClass::FullLocked);
        assert_eq!(classifier.classify_cell(4, 2), CellClass::FullLocked);

        // Window hanging over the map edge: the overhang degrades to FullLocked
        let result = classifier.classify_window(CellWindow::new(2, 2, 4, 4));
        assert_eq!(result.get(0, 0).unwrap().class, CellClass::FullUnlocked);
        assert_eq!(result.get(3, 3).unwrap().class, CellClass::FullLocked);
        assert_eq!(result.get(3, 3).unwrap().unlocked(), [false; 4]);
    }

    #[test]
    fn test_unlocking_never_lowers_a_class() {
        let mut grid = scattered(42);
        let dims = grid.dims();
        let before = CellClassifier::new(&grid, ClassifyPolicy::Ringed)
            .classify_window(CellWindow::whole_map(dims));

        for (x, z) in [(0, 0), (5, 5), (6, 11), (12, 3)] {
            grid.set_unlocked(x, z, true);
        }
        let after = CellClassifier::new(&grid, ClassifyPolicy::Ringed)
            .classify_window(CellWindow::whole_map(dims));

        for (b, a) in before.cells().iter().zip(after.cells()) {
            assert!(a.class >= b.class, "cell ({}, {}) went from {:?} to {:?}", b.global_x, b.global_z, b.class, a.class);
        }
    }

    #[test]
    fn test_vertex_class_more_unlocked_wins() {
        let grid = center_block();
        let classifier = CellClassifier::new(&grid, ClassifyPolicy::Ringed);
        let window = CellWindow::new(0, 0, 5, 5);
        let result = classifier.classify_window(window);

        // Corner (4, 4) touches cells (3,3), (4,3), (3,4) partial and (4,4) unlocked
        assert_eq!(classifier.vertex_class(&result, 4, 4), CellClass::FullUnlocked);
        // Corner (5, 5) sits outside the window on three sides; still resolved
        assert_eq!(classifier.vertex_class(&result, 5, 5), CellClass::FullUnlocked);
        assert_eq!(classifier.vertex_class(&result, 0, 0), CellClass::FullLocked);
        assert_eq!(classifier.vertex_class(&result, 2, 3), CellClass::AdjacentUnlocked);
    }
}
