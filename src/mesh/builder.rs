//! Builds one tile's mesh from classified cells

use crate::classify::{CellClassifier, CellWindow, ClassifiedWindow};
use crate::core::types::{Vec2, Vec3};
use crate::terrain::TerrainSource;
use super::tile_mesh::TileMesh;
use super::triangulate::{plan_cell, triangulate, CutPolicy, Neighbors, QuadCorners};

/// Turns a window of cells into a triangle mesh with holes where ground is unlocked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileMeshBuilder {
    pub cut_policy: CutPolicy,
    /// Split AdjacentUnlocked cells into four sub-quads
    pub subdivide_adjacent: bool,
}

impl TileMeshBuilder {
    pub fn new(cut_policy: CutPolicy, subdivide_adjacent: bool) -> Self {
        Self { cut_policy, subdivide_adjacent }
    }

    /// Build a fresh mesh for `window`
    pub fn build<S: TerrainSource + ?Sized>(
        &self,
        classifier: &CellClassifier<'_, S>,
        window: CellWindow,
    ) -> TileMesh {
        let mut mesh = TileMesh::default();
        self.build_into(classifier, window, &mut mesh);
        mesh
    }

    /// Clear `mesh` and rewrite it for `window`.
    ///
    /// Returns the classification the triangles were derived from. A window
    /// with no cells leaves an empty mesh.
    pub fn build_into<S: TerrainSource + ?Sized>(
        &self,
        classifier: &CellClassifier<'_, S>,
        window: CellWindow,
        mesh: &mut TileMesh,
    ) -> ClassifiedWindow {
        mesh.clear();
        let classified = classifier.classify_window(window);
        if window.is_empty() {
            return classified;
        }

        let source = classifier.source();
        let cell_size = source.dims().cell_size;
        let stride = window.cells_x + 1;

        // Corner grid, row-major; triangle indices below depend on this order
        for lz in 0..=window.cells_z {
            for lx in 0..=window.cells_x {
                let (gx, gz) = window.to_global(lx, lz);
                let sample = source.vertex_at(gx, gz);
                let position = Vec3::new(gx as f32 * cell_size, sample.height, gz as f32 * cell_size);
                let uv = Vec2::new(
                    lx as f32 / window.cells_x as f32,
                    lz as f32 / window.cells_z as f32,
                );
                let class = classifier.vertex_class(&classified, gx, gz);
                mesh.push_vertex(position, uv, sample.unlocked, class);
            }
        }

        for cell in classified.cells() {
            let bl = cell.local_z * stride + cell.local_x;
            let indices = [bl, bl + 1, bl + stride + 1, bl + stride];
            let quad = QuadCorners {
                indices,
                positions: indices.map(|i| mesh.positions[i as usize]),
                uvs: indices.map(|i| mesh.uvs[i as usize]),
                unlocked: cell.unlocked(),
            };

            let (gx, gz) = (cell.global_x, cell.global_z);
            let neighbors = Neighbors {
                left: classifier.class_of(&classified, gx - 1, gz),
                right: classifier.class_of(&classified, gx + 1, gz),
                down: classifier.class_of(&classified, gx, gz - 1),
                up: classifier.class_of(&classified, gx, gz + 1),
            };

            let plan = plan_cell(cell.class, quad.unlocked, &neighbors, self.cut_policy, self.subdivide_adjacent);
            let geo = triangulate(plan, &quad, mesh.vertex_count() as u32);
            for extra in geo.extra_vertices() {
                mesh.push_vertex(extra.position, extra.uv, extra.unlocked, cell.class);
            }
            for &tri in geo.triangles() {
                mesh.push_triangle(tri);
            }
        }

        mesh.recalculate_normals();
        mesh.recalculate_bounds();
        classified
    }
}
