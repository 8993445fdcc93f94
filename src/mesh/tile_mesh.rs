//! Mesh buffers owned by a single tile

use bytemuck::{Pod, Zeroable};

use crate::classify::CellClass;
use crate::core::types::{Vec2, Vec3};
use crate::math::Aabb;

/// Unlock encoding written for unlocked vertices
pub const UNLOCKED_ENCODING: Vec2 = Vec2::new(0.0, 1.0);
/// Unlock encoding written for locked vertices
pub const LOCKED_ENCODING: Vec2 = Vec2::new(1.0, 1.0);

pub fn unlock_encoding(unlocked: bool) -> Vec2 {
    if unlocked { UNLOCKED_ENCODING } else { LOCKED_ENCODING }
}

/// Interleaved vertex for GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TileVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub unlock: [f32; 2],
    /// [`CellClass`] ordinal of the most unlocked cell touching this vertex
    pub class: u32,
}

/// Structure-of-arrays mesh: one entry per vertex in each attribute buffer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    /// 2-component unlock signal, see [`UNLOCKED_ENCODING`] / [`LOCKED_ENCODING`]
    pub unlock: Vec<Vec2>,
    pub classes: Vec<CellClass>,
    /// Triangle list
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl TileMesh {
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            unlock: Vec::with_capacity(vertices),
            classes: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            bounds: Aabb::default(),
        }
    }

    /// Drop all geometry, keeping allocations
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.unlock.clear();
        self.classes.clear();
        self.indices.clear();
        self.bounds = Aabb::default();
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, position: Vec3, uv: Vec2, unlocked: bool, class: CellClass) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.uvs.push(uv);
        self.unlock.push(unlock_encoding(unlocked));
        self.classes.push(class);
        index
    }

    pub fn push_triangle(&mut self, tri: [u32; 3]) {
        self.indices.extend_from_slice(&tri);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Recompute bounds from the vertex positions (default box when empty)
    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.positions).unwrap_or_default();
    }

    /// Smooth vertex normals from the triangle list.
    ///
    /// Face normals are accumulated unnormalized, so larger triangles weigh
    /// more. Vertices no triangle references get +Y.
    pub fn recalculate_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let pa = self.positions[a];
            let face = (self.positions[b] - pa).cross(self.positions[c] - pa);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }

        for n in &mut self.normals {
            *n = n.try_normalize().unwrap_or(Vec3::Y);
        }
    }

    /// Interleave attributes for upload
    pub fn interleaved(&self) -> Vec<TileVertex> {
        (0..self.vertex_count())
            .map(|i| TileVertex {
                position: self.positions[i].to_array(),
                normal: self.normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
                uv: self.uvs[i].to_array(),
                unlock: self.unlock[i].to_array(),
                class: self.classes[i].order() as u32,
            })
            .collect()
    }
}
