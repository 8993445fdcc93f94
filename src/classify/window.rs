//! Rectangular cell windows and their classified contents

use crate::terrain::{CellCorners, GridDims};
use super::class::CellClass;

/// Rectangular block of cells addressed in global grid coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellWindow {
    /// Global coordinates of the window's first cell
    pub origin_x: i32,
    pub origin_z: i32,
    pub cells_x: u32,
    pub cells_z: u32,
}

impl CellWindow {
    pub fn new(origin_x: i32, origin_z: i32, cells_x: u32, cells_z: u32) -> Self {
        Self { origin_x, origin_z, cells_x, cells_z }
    }

    /// Window spanning every cell of a grid (the flat, one-pass build)
    pub fn whole_map(dims: GridDims) -> Self {
        Self::new(0, 0, dims.cells_x, dims.cells_z)
    }

    pub fn is_empty(&self) -> bool {
        self.cells_x == 0 || self.cells_z == 0
    }

    pub fn cell_count(&self) -> usize {
        self.cells_x as usize * self.cells_z as usize
    }

    pub fn contains_global(&self, gx: i32, gz: i32) -> bool {
        self.to_local(gx, gz).is_some()
    }

    pub fn to_local(&self, gx: i32, gz: i32) -> Option<(u32, u32)> {
        let lx = gx - self.origin_x;
        let lz = gz - self.origin_z;
        if lx < 0 || lz < 0 || lx as u32 >= self.cells_x || lz as u32 >= self.cells_z {
            return None;
        }
        Some((lx as u32, lz as u32))
    }

    pub fn to_global(&self, lx: u32, lz: u32) -> (i32, i32) {
        (self.origin_x + lx as i32, self.origin_z + lz as i32)
    }

    /// Row-major index of a local cell
    pub fn index(&self, lx: u32, lz: u32) -> usize {
        lz as usize * self.cells_x as usize + lx as usize
    }

    pub fn index_of_global(&self, gx: i32, gz: i32) -> Option<usize> {
        self.to_local(gx, gz).map(|(lx, lz)| self.index(lx, lz))
    }
}

/// One classified cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub local_x: u32,
    pub local_z: u32,
    pub global_x: i32,
    pub global_z: i32,
    /// Corner samples; all locked when the source could not supply them
    pub corners: CellCorners,
    pub class: CellClass,
}

impl Cell {
    /// Unlock flags in bl, br, tr, tl order
    pub fn unlocked(&self) -> [bool; 4] {
        self.corners.unlocked()
    }
}

/// Classification result for a window, row-major
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedWindow {
    pub(crate) window: CellWindow,
    pub(crate) cells: Vec<Cell>,
}

impl ClassifiedWindow {
    pub fn window(&self) -> CellWindow {
        self.window
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, lx: u32, lz: u32) -> Option<&Cell> {
        if lx >= self.window.cells_x || lz >= self.window.cells_z {
            return None;
        }
        self.cells.get(self.window.index(lx, lz))
    }

    pub fn get_global(&self, gx: i32, gz: i32) -> Option<&Cell> {
        self.window.index_of_global(gx, gz).map(|i| &self.cells[i])
    }

    /// Number of cells per class, indexed by [`CellClass::order`]
    pub fn class_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for cell in &self.cells {
            counts[cell.class.order() as usize] += 1;
        }
        counts
    }

    pub fn count(&self, class: CellClass) -> usize {
        self.class_counts()[class.order() as usize]
    }
}
