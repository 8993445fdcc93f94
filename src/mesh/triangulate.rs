//! Per-cell triangulation strategies
//!
//! A cell's class picks a [`CellPlan`]; the plan is then turned into
//! triangles (and, for subdivided cells, extra vertices) by a pure function.
//! All triangles wind counter-clockwise seen from +Y, so derived normals
//! point up.

use serde::{Deserialize, Serialize};

use crate::classify::CellClass;
use crate::core::types::{Vec2, Vec3};

/// How PartialUnlocked cells are cut
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutPolicy {
    /// Single diagonal triangle when exactly two adjacent neighbours are holes
    #[default]
    NeighborDiagonal,
    /// Single triangle when exactly three of the cell's own corners are unlocked
    CornerExact,
}

/// Cell corner, named from above with +X right and +Z up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    BottomLeft,
    BottomRight,
    TopRight,
    TopLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::BottomLeft, Corner::BottomRight, Corner::TopRight, Corner::TopLeft];

    pub fn opposite(self) -> Corner {
        match self {
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
            Corner::TopRight => Corner::BottomLeft,
            Corner::TopLeft => Corner::BottomRight,
        }
    }
}

/// Classes of the four 4-connected neighbours
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors {
    /// -X
    pub left: CellClass,
    /// +X
    pub right: CellClass,
    /// -Z
    pub down: CellClass,
    /// +Z
    pub up: CellClass,
}

impl Neighbors {
    /// The corner shared by exactly two adjacent hole neighbours, if that is
    /// the configuration. Three or more holes, or two opposite ones, give `None`.
    pub fn hole_corner(&self) -> Option<Corner> {
        let left = self.left.is_hole();
        let right = self.right.is_hole();
        let down = self.down.is_hole();
        let up = self.up.is_hole();

        match (left, right, down, up) {
            (true, false, true, false) => Some(Corner::BottomLeft),
            (false, true, true, false) => Some(Corner::BottomRight),
            (false, true, false, true) => Some(Corner::TopRight),
            (true, false, false, true) => Some(Corner::TopLeft),
            _ => None,
        }
    }
}

/// What to emit for one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellPlan {
    /// Nothing: unlocked ground is drawn elsewhere
    Hole,
    /// The standard two-triangle quad
    Quad,
    /// One triangle; the half of the quad at the given corner is dropped
    Cut(Corner),
    /// Four sub-quads through edge midpoints and the center
    Subdivided,
}

impl CellPlan {
    pub fn triangle_count(self) -> usize {
        match self {
            CellPlan::Hole => 0,
            CellPlan::Quad => 2,
            CellPlan::Cut(_) => 1,
            CellPlan::Subdivided => 8,
        }
    }
}

/// Choose the plan for a cell from its class, own corners and neighbours
pub fn plan_cell(
    class: CellClass,
    unlocked: [bool; 4],
    neighbors: &Neighbors,
    policy: CutPolicy,
    subdivide_adjacent: bool,
) -> CellPlan {
    match class {
        CellClass::FullUnlocked => CellPlan::Hole,
        CellClass::FullLocked => CellPlan::Quad,
        CellClass::AdjacentUnlocked if subdivide_adjacent => CellPlan::Subdivided,
        CellClass::AdjacentUnlocked => CellPlan::Quad,
        CellClass::PartialUnlocked => match policy {
            CutPolicy::NeighborDiagonal => neighbors.hole_corner().map_or(CellPlan::Quad, CellPlan::Cut),
            CutPolicy::CornerExact => {
                let mut locked = Corner::ALL
                    .into_iter()
                    .zip(unlocked)
                    .filter(|&(_, u)| !u)
                    .map(|(c, _)| c);
                match (locked.next(), locked.next()) {
                    // Keep the locked corner's half: drop the half opposite it
                    (Some(only), None) => CellPlan::Cut(only.opposite()),
                    _ => CellPlan::Quad,
                }
            }
        },
    }
}

/// Vertex indices and attributes of one cell's corners, in bl, br, tr, tl order
#[derive(Clone, Copy, Debug)]
pub struct QuadCorners {
    pub indices: [u32; 4],
    pub positions: [Vec3; 4],
    pub uvs: [Vec2; 4],
    pub unlocked: [bool; 4],
}

impl QuadCorners {
    fn index(&self, corner: Corner) -> u32 {
        self.indices[corner as usize]
    }
}

/// A vertex added by subdivision
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExtraVertex {
    pub position: Vec3,
    pub uv: Vec2,
    pub unlocked: bool,
}

/// Triangles and extra vertices for one cell, without heap allocation
#[derive(Clone, Copy, Debug, Default)]
pub struct CellGeometry {
    extra: [ExtraVertex; 5],
    extra_len: usize,
    triangles: [[u32; 3]; 8],
    triangle_len: usize,
}

impl CellGeometry {
    pub fn extra_vertices(&self) -> &[ExtraVertex] {
        &self.extra[..self.extra_len]
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles[..self.triangle_len]
    }

    fn push_triangle(&mut self, tri: [u32; 3]) {
        self.triangles[self.triangle_len] = tri;
        self.triangle_len += 1;
    }

    fn push_extra(&mut self, v: ExtraVertex) -> usize {
        self.extra[self.extra_len] = v;
        self.extra_len += 1;
        self.extra_len - 1
    }

    /// Standard split along the bl-tr diagonal
    fn push_quad(&mut self, bl: u32, br: u32, tr: u32, tl: u32) {
        self.push_triangle([bl, tl, br]);
        self.push_triangle([br, tl, tr]);
    }
}

/// Turn a plan into geometry.
///
/// `next_index` is the mesh index the first extra vertex will receive.
pub fn triangulate(plan: CellPlan, quad: &QuadCorners, next_index: u32) -> CellGeometry {
    let mut geo = CellGeometry::default();
    let [bl, br, tr, tl] = quad.indices;

    match plan {
        CellPlan::Hole => {}
        CellPlan::Quad => geo.push_quad(bl, br, tr, tl),
        CellPlan::Cut(dropped) => {
            let tri = match dropped {
                Corner::BottomLeft => [br, tl, tr],
                Corner::BottomRight => [bl, tl, tr],
                Corner::TopRight => [bl, tl, br],
                Corner::TopLeft => [bl, tr, br],
            };
            debug_assert!(!tri.contains(&quad.index(dropped)));
            geo.push_triangle(tri);
        }
        CellPlan::Subdivided => {
            let mid = |a: usize, b: usize| ExtraVertex {
                position: (quad.positions[a] + quad.positions[b]) * 0.5,
                uv: (quad.uvs[a] + quad.uvs[b]) * 0.5,
                unlocked: quad.unlocked[a] && quad.unlocked[b],
            };
            let center = ExtraVertex {
                position: quad.positions.iter().copied().sum::<Vec3>() * 0.25,
                uv: quad.uvs.iter().copied().sum::<Vec2>() * 0.25,
                unlocked: quad.unlocked.iter().all(|&u| u),
            };

            let base = next_index;
            let mb = base + geo.push_extra(mid(0, 1)) as u32;
            let mr = base + geo.push_extra(mid(1, 2)) as u32;
            let mt = base + geo.push_extra(mid(3, 2)) as u32;
            let ml = base + geo.push_extra(mid(0, 3)) as u32;
            let c = base + geo.push_extra(center) as u32;

            geo.push_quad(bl, mb, c, ml);
            geo.push_quad(mb, br, mr, c);
            geo.push_quad(ml, c, mt, tl);
            geo.push_quad(c, mr, tr, mt);
        }
    }
    geo
}
