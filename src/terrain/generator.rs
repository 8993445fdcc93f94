//! Noise-based terrain generation for the data grid

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use super::grid::{TerrainCategory, TerrainGrid, TerrainSample};
use super::source::GridDims;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Parameters controlling terrain generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub seed: u32,
    pub scale: f32,        // Horizontal scale (larger = smoother)
    pub height_scale: f32, // Vertical scale (max height)
    pub octaves: u32,      // FBM octaves (detail levels)
    pub persistence: f32,  // FBM persistence (0.5 typical)
    pub lacunarity: f32,   // FBM lacunarity (2.0 typical)
    /// World XZ center of the region that starts out revealed
    pub reveal_center: [f32; 2],
    /// Radius of the revealed region; 0 reveals nothing
    pub reveal_radius: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 100.0,
            height_scale: 8.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            reveal_center: [250.0, 250.0],
            reveal_radius: 40.0,
        }
    }
}

/// Procedural terrain generator using fractal Brownian motion (FBM)
pub struct TerrainGenerator {
    params: TerrainParams,
    noise: Fbm<Perlin>,
}

impl TerrainGenerator {
    /// Create a new terrain generator with the given parameters
    pub fn new(params: TerrainParams) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);

        Self { params, noise }
    }

    /// Get terrain parameters
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Get terrain height at world position (x, z)
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let nx = (x / self.params.scale) as f64;
        let nz = (z / self.params.scale) as f64;

        // Noise in [-1, 1] mapped to [0, height_scale]
        let noise_value = self.noise.get([nx, nz]);
        let normalized = ((noise_value + 1.0) / 2.0).clamp(0.0, 1.0);
        (normalized * self.params.height_scale as f64) as f32
    }

    /// Category of the world position: revealed inside the starting region
    pub fn category_at(&self, x: f32, z: f32) -> TerrainCategory {
        let center = Vec2::from_array(self.params.reveal_center);
        let radius = self.params.reveal_radius;
        if radius > 0.0 && Vec2::new(x, z).distance_squared(center) <= radius * radius {
            TerrainCategory::Revealed
        } else {
            TerrainCategory::Wild
        }
    }

    /// Generate a data grid of the given dimensions
    pub fn generate(&self, dims: GridDims) -> TerrainGrid {
        let grid = TerrainGrid::from_fn(dims, |x, z| {
            let wx = x as f32 * dims.cell_size;
            let wz = z as f32 * dims.cell_size;
            TerrainSample {
                height: self.height_at(wx, wz),
                category: self.category_at(wx, wz),
                unlocked: false,
            }
        });

        log::info!(
            "Generated terrain grid: {}x{} cells at {}m, {} corners revealed",
            dims.cells_x, dims.cells_z, dims.cell_size, grid.unlocked_count()
        );
        grid
    }
}
