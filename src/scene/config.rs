//! Fog field configuration, loaded from and saved to JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::ClassifyPolicy;
use crate::core::{Error, Result};
use crate::culling::VisibilityCuller;
use crate::mesh::{CutPolicy, TileMeshBuilder};
use crate::terrain::{GridDims, TerrainParams};
use crate::tiles::TileLayout;

/// Everything needed to build and cull a fog field.
///
/// Sizes are in world units. Missing JSON fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub map_width: f32,
    pub map_height: f32,
    /// Cell size of the rendered mesh
    pub display_cell_size: f32,
    /// Cell size of the terrain data
    pub data_cell_size: f32,
    /// Tile footprint
    pub tile_width: f32,
    pub tile_height: f32,
    pub culling_enabled: bool,
    /// Height of the plane the frustum is projected onto
    pub ground_height: f32,
    /// Extra distance around the projected footprint that stays active
    pub culling_margin: f32,
    pub classify_policy: ClassifyPolicy,
    pub cut_policy: CutPolicy,
    pub subdivide_adjacent: bool,
    pub terrain: TerrainParams,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            map_width: 500.0,
            map_height: 500.0,
            display_cell_size: 1.0,
            data_cell_size: 2.0,
            tile_width: 50.0,
            tile_height: 50.0,
            culling_enabled: true,
            ground_height: 0.0,
            culling_margin: 10.0,
            classify_policy: ClassifyPolicy::default(),
            cut_policy: CutPolicy::default(),
            subdivide_adjacent: false,
            terrain: TerrainParams::default(),
        }
    }
}

impl FogConfig {
    /// Read and validate a JSON config
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: FogConfig = serde_json::from_str(&json)
            .map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Parse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject non-positive sizes and a negative margin
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("map_width", self.map_width),
            ("map_height", self.map_height),
            ("display_cell_size", self.display_cell_size),
            ("data_cell_size", self.data_cell_size),
            ("tile_width", self.tile_width),
            ("tile_height", self.tile_height),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{} must be positive, got {}", name, value)));
            }
        }
        if !(self.culling_margin.is_finite() && self.culling_margin >= 0.0) {
            return Err(Error::Config(format!("culling_margin must be non-negative, got {}", self.culling_margin)));
        }
        if !self.ground_height.is_finite() {
            return Err(Error::Config("ground_height must be finite".into()));
        }
        Ok(())
    }

    /// Grid the terrain data is stored at
    pub fn data_dims(&self) -> GridDims {
        GridDims::covering(self.map_width, self.map_height, self.data_cell_size)
    }

    /// Grid the mesh is built at
    pub fn display_dims(&self) -> GridDims {
        GridDims::covering(self.map_width, self.map_height, self.display_cell_size)
    }

    pub fn tile_layout(&self, dims: GridDims) -> TileLayout {
        TileLayout::with_footprint(dims, self.tile_width, self.tile_height)
    }

    pub fn mesh_builder(&self) -> TileMeshBuilder {
        TileMeshBuilder::new(self.cut_policy, self.subdivide_adjacent)
    }

    pub fn culler(&self) -> VisibilityCuller {
        VisibilityCuller::new(self.culling_enabled, self.ground_height, self.culling_margin)
    }
}
